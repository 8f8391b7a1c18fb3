//! 메모리 기반 사용자 리포지토리 (개발/테스트용)

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::user_repo::UserRepository;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::request::UserFilter;
use crate::domain::entities::users::user::{User, UserChanges};

#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_unique(users: &HashMap<String, User>, candidate: &User) -> AppResult<()> {
        for existing in users.values().filter(|u| u.id != candidate.id) {
            if existing.email == candidate.email {
                return Err(AppError::ConflictError(format!(
                    "이미 사용 중인 이메일입니다: {}",
                    candidate.email
                )));
            }
            if existing.nickname == candidate.nickname {
                return Err(AppError::ConflictError(format!(
                    "이미 사용 중인 닉네임입니다: {}",
                    candidate.nickname
                )));
            }
        }
        Ok(())
    }

    fn sorted(mut users: Vec<User>) -> Vec<User> {
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        users
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.nickname == nickname).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(AppError::ConflictError(format!("이미 존재하는 ID입니다: {}", user.id)));
        }
        Self::ensure_unique(&users, &user)?;

        users.insert(user.id.clone(), user.clone());
        log::debug!("사용자 저장 (memory): {}", user.id);
        Ok(user)
    }

    async fn update(&self, id: &str, changes: &UserChanges) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(mut updated) = users.get(id).cloned() else {
            return Ok(None);
        };
        changes.apply_to(&mut updated);
        Self::ensure_unique(&users, &updated)?;

        users.insert(updated.id.clone(), updated.clone());
        Ok(Some(updated))
    }

    async fn set_password(&self, id: &str, hashed_password: &str) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(id).map(|user| {
            user.hashed_password = hashed_password.to_string();
            user.touch();
            user.clone()
        }))
    }

    async fn increment_failed_login(&self, id: &str, max_login_attempts: NonZeroU32) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(id).map(|user| {
            user.record_failed_login(max_login_attempts.get());
            user.clone()
        }))
    }

    async fn record_login_success(&self, id: &str) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(id).filter(|user| !user.is_locked).map(|user| {
            user.record_successful_login();
            user.clone()
        }))
    }

    async fn unlock(&self, id: &str) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(id).filter(|user| user.is_locked).map(|user| {
            user.unlock();
            user.clone()
        }))
    }

    async fn consume_verification_token(&self, id: &str, token: &str) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;

        Ok(users
            .get_mut(id)
            .filter(|user| user.verification_token.as_deref() == Some(token))
            .map(|user| {
                user.mark_verified();
                user.clone()
            }))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.users.write().await.remove(id).is_some())
    }

    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let all = Self::sorted(users.values().cloned().collect());

        Ok(all
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn search(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let matched = users
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();

        Ok(Self::sorted(matched))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::UserRole;
    use mongodb::bson::DateTime;

    fn user(nickname: &str, email: &str) -> User {
        User::new(
            nickname.to_string(),
            email.to_string(),
            "hashed_password".to_string(),
            UserRole::Authenticated,
        )
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("finder", "finder@example.com")).await.unwrap();

        assert!(repo.find_by_id(&created.id).await.unwrap().is_some());
        assert!(repo.find_by_nickname("finder").await.unwrap().is_some());
        assert!(repo.find_by_email("finder@example.com").await.unwrap().is_some());

        // 정확히 일치하는 경우만 조회
        assert!(repo.find_by_email("FINDER@example.com").await.unwrap().is_none());
        assert!(repo.find_by_id("non-existent-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_and_nickname_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("first", "dup@example.com")).await.unwrap();

        let by_email = repo.create(user("second", "dup@example.com")).await;
        assert!(matches!(by_email, Err(AppError::ConflictError(_))));

        let by_nickname = repo.create(user("first", "other@example.com")).await;
        assert!(matches!(by_nickname, Err(AppError::ConflictError(_))));

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    fn attempts(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();
        let changes = UserChanges {
            bio: Some(Some("hello".to_string())),
            ..Default::default()
        };

        assert!(repo.update("ghost", &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_into_taken_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("alice", "alice@example.com")).await.unwrap();
        let bob = repo.create(user("bob", "bob@example.com")).await.unwrap();

        let changes = UserChanges {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        let result = repo.update(&bob.id, &changes).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        let stored = repo.find_by_email("bob@example.com").await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_field_writes_keep_lock_state() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("guarded", "guarded@example.com")).await.unwrap();
        repo.increment_failed_login(&created.id, attempts(1)).await.unwrap();

        let changes = UserChanges {
            bio: Some(Some("still locked".to_string())),
            ..Default::default()
        };
        repo.update(&created.id, &changes).await.unwrap();
        let stored = repo.set_password(&created.id, "new_hash").await.unwrap().unwrap();

        assert!(stored.is_locked);
        assert_eq!(stored.failed_login_count, 1);
        assert_eq!(stored.hashed_password, "new_hash");
        assert_eq!(stored.bio.as_deref(), Some("still locked"));
    }

    #[tokio::test]
    async fn test_increment_failed_login_locks_at_threshold() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("locker", "locker@example.com")).await.unwrap();

        let first = repo.increment_failed_login(&created.id, attempts(2)).await.unwrap().unwrap();
        assert_eq!(first.failed_login_count, 1);
        assert!(!first.is_locked);

        let second = repo.increment_failed_login(&created.id, attempts(2)).await.unwrap().unwrap();
        assert_eq!(second.failed_login_count, 2);
        assert!(second.is_locked);

        assert!(repo.increment_failed_login("missing", attempts(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_success_is_refused_once_locked() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("racer", "racer@example.com")).await.unwrap();
        repo.increment_failed_login(&created.id, attempts(3)).await.unwrap();

        let logged_in = repo.record_login_success(&created.id).await.unwrap().unwrap();
        assert_eq!(logged_in.failed_login_count, 0);
        assert!(logged_in.last_login_at.is_some());

        repo.increment_failed_login(&created.id, attempts(1)).await.unwrap();
        assert!(repo.record_login_success(&created.id).await.unwrap().is_none());
        assert!(repo.find_by_id(&created.id).await.unwrap().unwrap().is_locked);
    }

    #[tokio::test]
    async fn test_unlock_only_touches_locked_accounts() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("unlockable", "unlockable@example.com")).await.unwrap();

        assert!(repo.unlock(&created.id).await.unwrap().is_none());

        repo.increment_failed_login(&created.id, attempts(1)).await.unwrap();
        let unlocked = repo.unlock(&created.id).await.unwrap().unwrap();

        assert!(!unlocked.is_locked);
        assert_eq!(unlocked.failed_login_count, 0);
        assert!(repo.unlock("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_consume_verification_token() {
        let repo = InMemoryUserRepository::new();
        let mut pending = user("pending", "pending@example.com");
        pending.role = UserRole::Anonymous;
        pending.verification_token = Some("expected".to_string());
        let created = repo.create(pending).await.unwrap();

        assert!(repo.consume_verification_token(&created.id, "other").await.unwrap().is_none());

        let verified = repo
            .consume_verification_token(&created.id, "expected")
            .await
            .unwrap()
            .unwrap();
        assert!(verified.is_verified);
        assert!(verified.verification_token.is_none());
        assert_eq!(verified.role, UserRole::Authenticated);

        // 토큰은 한 번만 사용 가능
        assert!(repo.consume_verification_token(&created.id, "expected").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_zero_limit_returns_empty_page() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("only", "only@example.com")).await.unwrap();

        assert!(repo.list(0, 0).await.unwrap().is_empty());
        assert_eq!(repo.list(0, u64::MAX).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_paginated() {
        let repo = InMemoryUserRepository::new();
        for i in 0..25 {
            let mut u = user(&format!("user_{:02}", i), &format!("user{:02}@example.com", i));
            u.created_at = DateTime::from_millis(1_700_000_000_000 + i as i64 * 1000);
            repo.create(u).await.unwrap();
        }

        let page_1 = repo.list(0, 10).await.unwrap();
        let page_2 = repo.list(10, 10).await.unwrap();
        let page_3 = repo.list(20, 10).await.unwrap();

        assert_eq!(page_1.len(), 10);
        assert_eq!(page_2.len(), 10);
        assert_eq!(page_3.len(), 5);
        assert_eq!(page_1[0].nickname, "user_00");
        assert_eq!(page_2[0].nickname, "user_10");
        assert_eq!(page_3[4].nickname, "user_24");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("deleted", "deleted@example.com")).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
    }
}
