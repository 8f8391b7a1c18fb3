//! 통합 테스트 공용 픽스처

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::DateTime;
use tokio::sync::Mutex;

use user_account_service::config::Settings;
use user_account_service::core::errors::{AppError, AppResult};
use user_account_service::domain::entities::users::user::{User, UserRole};
use user_account_service::repositories::users::{InMemoryUserRepository, UserRepository};
use user_account_service::services::email::EmailService;
use user_account_service::services::users::UserService;

pub const TEST_PASSWORD: &str = "MySuperPassword$1234";

/// 발송 요청을 기록만 하는 메일 서비스
#[derive(Default)]
pub struct RecordingEmailService {
    sent: Mutex<Vec<(String, Option<String>)>>,
    should_fail: bool,
}

impl RecordingEmailService {
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn was_sent_to(&self, email: &str) -> bool {
        self.sent.lock().await.iter().any(|(to, _)| to == email)
    }

    pub async fn token_sent_to(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .find(|(to, _)| to == email)
            .and_then(|(_, token)| token.clone())
    }
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send_verification_email(&self, user: &User) -> AppResult<()> {
        if self.should_fail {
            return Err(AppError::ExternalServiceError("mail api unavailable".to_string()));
        }
        self.sent
            .lock()
            .await
            .push((user.email.clone(), user.verification_token.clone()));
        Ok(())
    }
}

pub struct TestContext {
    pub repo: InMemoryUserRepository,
    pub mailer: Arc<RecordingEmailService>,
    pub service: UserService,
}

pub fn test_settings() -> Settings {
    Settings {
        bcrypt_cost: 4,
        ..Settings::default()
    }
}

pub fn context() -> TestContext {
    context_with(RecordingEmailService::default(), test_settings())
}

pub fn context_with(mailer: RecordingEmailService, settings: Settings) -> TestContext {
    let repo = InMemoryUserRepository::new();
    let mailer = Arc::new(mailer);
    let service = UserService::new(Arc::new(repo.clone()), mailer.clone(), settings);

    TestContext { repo, mailer, service }
}

pub fn hash_password(password: &str) -> String {
    bcrypt::hash(password, 4).expect("hash test password")
}

pub fn build_user(nickname: &str, email: &str, role: UserRole) -> User {
    User::new(
        nickname.to_string(),
        email.to_string(),
        hash_password(TEST_PASSWORD),
        role,
    )
}

impl TestContext {
    pub async fn insert(&self, user: User) -> User {
        self.repo.create(user).await.expect("insert fixture user")
    }

    /// 인증되지 않은 일반 사용자
    pub async fn user(&self) -> User {
        let mut user = build_user("john_doe_123", "john.doe@example.com", UserRole::Authenticated);
        user.verification_token = Some("fixture_token".to_string());
        self.insert(user).await
    }

    pub async fn verified_user(&self) -> User {
        let mut user = build_user("verified_user", "verified@example.com", UserRole::Authenticated);
        user.is_verified = true;
        self.insert(user).await
    }

    pub async fn locked_user(&self) -> User {
        let mut user = build_user("locked_user", "locked@example.com", UserRole::Authenticated);
        user.is_verified = true;
        user.is_locked = true;
        user.failed_login_count = 3;
        self.insert(user).await
    }

    pub async fn users_with_same_role(&self, count: usize) -> Vec<User> {
        let mut users = Vec::with_capacity(count);
        for i in 0..count {
            let mut user = build_user(
                &format!("user_{:02}", i),
                &format!("user{:02}@example.com", i),
                UserRole::Authenticated,
            );
            user.created_at = DateTime::from_millis(1_700_000_000_000 + i as i64 * 1000);
            users.push(self.insert(user).await);
        }
        users
    }

    /// 오늘부터 `days`일 전까지 하루 간격으로 생성된 사용자
    pub async fn users_with_dates(&self, days: i64) -> Vec<User> {
        let now = DateTime::now().timestamp_millis();
        let mut users = Vec::new();
        for day in 0..days {
            let mut user = build_user(
                &format!("dated_{:02}", day),
                &format!("dated{:02}@example.com", day),
                UserRole::Authenticated,
            );
            user.created_at = DateTime::from_millis(now - day * 86_400_000);
            users.push(self.insert(user).await);
        }
        users
    }
}
