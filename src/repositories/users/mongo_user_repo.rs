//! # MongoDB 사용자 리포지토리 구현
//!
//! MongoDB를 주 저장소로 사용하고, 선택적으로 Redis를 통한 ID 기준 조회 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **유니크 인덱스**: `email`, `nickname` 중복을 DB 수준에서 차단 (E11000 → `ConflictError`)
//! - **원자적 잠금 카운트**: 집계 파이프라인 업데이트로 실패 횟수 증가와 잠금을 한 번에 처리
//! - **필드 단위 갱신**: 쓰기 연산은 `$set`/파이프라인으로 자신이 바꾸는 필드만 갱신
//! - **캐싱**: `user:{id}:v{세대}` 키, TTL 10분. 쓰기 연산은 세대 카운터를 올려
//!   이전 세대 캐시를 더 이상 읽히지 않게 합니다. 세대를 먼저 읽고 DB를 조회하므로,
//!   쓰기와 겹친 조회가 늦게 저장한 값은 이미 지난 세대 키에만 남습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let database = Arc::new(Database::new().await?);
//! let redis = Arc::new(RedisClient::new().await?);
//!
//! let repo = MongoUserRepository::with_cache(database, redis);
//! repo.create_indexes().await?;
//!
//! let user = repo.find_by_email("alice@example.com").await?;
//! ```

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument, UpdateModifications},
    Collection, IndexModel,
};

use super::user_repo::UserRepository;
use crate::{
    caching::redis::RedisClient,
    core::errors::{AppError, AppResult},
    db::Database,
    domain::{
        dto::users::request::UserFilter,
        entities::users::user::{User, UserChanges, UserRole},
    },
};

const USERS_COLLECTION: &str = "users";
const USER_CACHE_TTL_SECONDS: u64 = 600;
/// 세대 카운터는 캐시 엔트리보다 오래 살아야 이전 세대 키가 다시 읽히지 않습니다.
const CACHE_GENERATION_TTL_SECONDS: u64 = USER_CACHE_TTL_SECONDS * 2;
const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct MongoUserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트 (없으면 캐싱하지 않음)
    redis: Option<Arc<RedisClient>>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db, redis: None }
    }

    pub fn with_cache(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis: Some(redis) }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(USERS_COLLECTION)
    }

    fn cache_key(id: &str, generation: u64) -> String {
        format!("user:{}:v{}", id, generation)
    }

    fn generation_key(id: &str) -> String {
        format!("user:{}:generation", id)
    }

    /// 현재 캐시 세대. Redis가 없거나 조회에 실패하면 캐시를 건너뜁니다.
    async fn cache_generation(&self, id: &str) -> Option<u64> {
        let redis = self.redis.as_ref()?;
        match redis.get::<u64>(&Self::generation_key(id)).await {
            Ok(generation) => Some(generation.unwrap_or(0)),
            Err(e) => {
                log::warn!("캐시 세대 조회 실패 ({}): {}", id, e);
                None
            }
        }
    }

    async fn cached(&self, id: &str, generation: u64) -> Option<User> {
        let redis = self.redis.as_ref()?;
        match redis.get::<User>(&Self::cache_key(id, generation)).await {
            Ok(cached) => cached,
            Err(e) => {
                log::warn!("캐시 조회 실패 ({}): {}", id, e);
                None
            }
        }
    }

    async fn cache(&self, user: &User, generation: u64) {
        if let Some(redis) = &self.redis {
            let key = Self::cache_key(&user.id, generation);
            if let Err(e) = redis.set_with_expiry(&key, user, USER_CACHE_TTL_SECONDS).await {
                log::warn!("캐시 저장 실패 ({}): {}", user.id, e);
            }
        }
    }

    async fn invalidate_cache(&self, id: &str) {
        if let Some(redis) = &self.redis {
            let key = Self::generation_key(id);
            if let Err(e) = redis.incr_with_expiry(&key, CACHE_GENERATION_TTL_SECONDS).await {
                log::warn!("캐시 무효화 실패 ({}): {}", id, e);
            }
        }
    }

    /// `_id`와 추가 조건에 맞는 문서 하나를 갱신하고 갱신 후 문서를 반환합니다.
    async fn modify(&self, id: &str, condition: Document, update: UpdateModifications) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let mut filter = doc! { "_id": id };
        filter.extend(condition);

        let updated = self.collection()
            .find_one_and_update(filter, update)
            .with_options(options)
            .await
            .map_err(map_write_error)?;

        self.invalidate_cache(id).await;

        Ok(updated)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 1. `email` 유니크 인덱스
    /// 2. `nickname` 유니크 인덱스
    /// 3. `created_at` + `_id` 정렬 인덱스 (목록/검색 페이지네이션)
    ///
    /// 이미 중복 데이터가 있으면 유니크 인덱스 생성은 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let nickname_index = IndexModel::builder()
            .keys(doc! { "nickname": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("nickname_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": 1, "_id": 1 })
            .options(IndexOptions::builder()
                .name("created_at_id".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, nickname_index, created_at_index])
            .await?;

        log::info!("✅ users 컬렉션 인덱스 생성 완료");
        Ok(())
    }

    async fn find_many(&self, query: Document, skip: u64, limit: Option<u64>) -> AppResult<Vec<User>> {
        // 드라이버는 0을 "제한 없음", 음수를 "단일 배치"로 해석
        if limit == Some(0) {
            return Ok(Vec::new());
        }

        let collection = self.collection();
        let mut find = collection
            .find(query)
            .sort(doc! { "created_at": 1, "_id": 1 })
            .skip(skip);

        if let Some(limit) = limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }
}

/// 변경 내역을 `$set`/`$unset` 업데이트 문서로 변환합니다.
pub fn update_document(changes: &UserChanges) -> Document {
    let now = DateTime::now();
    let mut set = doc! { "updated_at": now };
    let mut unset = Document::new();

    if let Some(ref email) = changes.email {
        set.insert("email", email.as_str());
    }
    if let Some(ref nickname) = changes.nickname {
        set.insert("nickname", nickname.as_str());
    }
    if let Some(ref hashed_password) = changes.hashed_password {
        set.insert("hashed_password", hashed_password.as_str());
    }

    for (field, change) in changes.profile_fields() {
        match change {
            Some(Some(value)) => {
                set.insert(field, value.as_str());
            }
            Some(None) => {
                unset.insert(field, "");
            }
            None => {}
        }
    }

    if let Some(role) = changes.role {
        set.insert("role", role.as_str());
    }
    if let Some(is_professional) = changes.is_professional {
        set.insert("is_professional", is_professional);
        set.insert("professional_status_updated_at", now);
    }

    let mut update = doc! { "$set": set };
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

/// 검색 필터를 MongoDB 쿼리 문서로 변환합니다.
pub fn filter_document(filter: &UserFilter) -> Document {
    let mut query = Document::new();

    if let Some(ref username) = filter.username {
        query.insert("nickname", doc! { "$regex": regex::escape(username), "$options": "i" });
    }
    if let Some(ref email) = filter.email {
        query.insert("email", doc! { "$regex": regex::escape(email), "$options": "i" });
    }
    if let Some(role) = filter.role {
        query.insert("role", role.as_str());
    }
    if let Some(status) = filter.account_status {
        query.insert("is_locked", status.is_locked());
    }

    let (start, end) = filter.created_at_bounds_millis();
    if start.is_some() || end.is_some() {
        let mut range = Document::new();
        if let Some(start) = start {
            range.insert("$gte", DateTime::from_millis(start));
        }
        if let Some(end) = end {
            range.insert("$lt", DateTime::from_millis(end));
        }
        query.insert("created_at", range);
    }

    query
}

fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn map_write_error(error: mongodb::error::Error) -> AppError {
    if is_duplicate_key_error(&error) {
        AppError::ConflictError("이미 사용 중인 이메일 또는 닉네임입니다".to_string())
    } else {
        AppError::DatabaseError(error.to_string())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let generation = self.cache_generation(id).await;

        if let Some(generation) = generation {
            if let Some(cached) = self.cached(id, generation).await {
                return Ok(Some(cached));
            }
        }

        let user = self.collection()
            .find_one(doc! { "_id": id })
            .await?;

        if let (Some(generation), Some(user)) = (generation, &user) {
            self.cache(user, generation).await;
        }

        Ok(user)
    }

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "nickname": nickname })
            .await
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, user: User) -> AppResult<User> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if self.find_by_nickname(&user.nickname).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 닉네임입니다".to_string()));
        }

        // 동시 가입 경쟁은 유니크 인덱스가 최종적으로 차단
        self.collection()
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;

        Ok(user)
    }

    async fn update(&self, id: &str, changes: &UserChanges) -> AppResult<Option<User>> {
        self.modify(id, Document::new(), update_document(changes).into()).await
    }

    async fn set_password(&self, id: &str, hashed_password: &str) -> AppResult<Option<User>> {
        let update = doc! {
            "$set": { "hashed_password": hashed_password, "updated_at": DateTime::now() }
        };
        self.modify(id, Document::new(), update.into()).await
    }

    async fn increment_failed_login(&self, id: &str, max_login_attempts: NonZeroU32) -> AppResult<Option<User>> {
        let next_count = doc! { "$add": ["$failed_login_count", 1] };
        let pipeline = vec![doc! {
            "$set": {
                "failed_login_count": next_count.clone(),
                "is_locked": {
                    "$or": ["$is_locked", { "$gte": [next_count, i64::from(max_login_attempts.get())] }]
                },
                "updated_at": DateTime::now(),
            }
        }];

        self.modify(id, Document::new(), pipeline.into()).await
    }

    async fn record_login_success(&self, id: &str) -> AppResult<Option<User>> {
        let now = DateTime::now();
        let update = doc! {
            "$set": { "failed_login_count": 0, "last_login_at": now, "updated_at": now }
        };
        self.modify(id, doc! { "is_locked": false }, update.into()).await
    }

    async fn unlock(&self, id: &str) -> AppResult<Option<User>> {
        let update = doc! {
            "$set": { "is_locked": false, "failed_login_count": 0, "updated_at": DateTime::now() }
        };
        self.modify(id, doc! { "is_locked": true }, update.into()).await
    }

    async fn consume_verification_token(&self, id: &str, token: &str) -> AppResult<Option<User>> {
        let promoted_role = doc! {
            "$cond": [
                { "$eq": ["$role", UserRole::Anonymous.as_str()] },
                UserRole::Authenticated.as_str(),
                "$role",
            ]
        };
        let pipeline = vec![
            doc! {
                "$set": {
                    "is_verified": true,
                    "role": promoted_role,
                    "updated_at": DateTime::now(),
                }
            },
            doc! { "$unset": "verification_token" },
        ];

        self.modify(id, doc! { "verification_token": token }, pipeline.into()).await
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection()
            .delete_one(doc! { "_id": id })
            .await?;

        if result.deleted_count > 0 {
            self.invalidate_cache(id).await;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<User>> {
        self.find_many(Document::new(), skip, Some(limit)).await
    }

    async fn search(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        self.find_many(filter_document(filter), 0, None).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.collection()
            .count_documents(doc! {})
            .await
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::users::request::AccountStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_filter_document() {
        assert!(filter_document(&UserFilter::default()).is_empty());
    }

    #[test]
    fn test_filter_document_fields() {
        let filter = UserFilter {
            username: Some("first.last".to_string()),
            email: Some("example".to_string()),
            role: Some(UserRole::Manager),
            account_status: Some(AccountStatus::Locked),
            ..Default::default()
        };

        let query = filter_document(&filter);

        let nickname = query.get_document("nickname").unwrap();
        assert_eq!(nickname.get_str("$regex").unwrap(), r"first\.last");
        assert_eq!(nickname.get_str("$options").unwrap(), "i");
        assert_eq!(query.get_document("email").unwrap().get_str("$regex").unwrap(), "example");
        assert_eq!(query.get_str("role").unwrap(), "MANAGER");
        assert!(query.get_bool("is_locked").unwrap());
    }

    #[test]
    fn test_cache_keys_are_scoped_by_generation() {
        let id = "6f1c2a5e-0000-4000-8000-000000000000";

        assert_eq!(MongoUserRepository::cache_key(id, 0), format!("user:{}:v0", id));
        assert_ne!(MongoUserRepository::cache_key(id, 1), MongoUserRepository::cache_key(id, 2));
        assert_eq!(MongoUserRepository::generation_key(id), format!("user:{}:generation", id));
    }

    #[test]
    fn test_filter_document_escapes_regex_input() {
        let query = filter_document(&UserFilter {
            email: Some("user+tag@example.com".to_string()),
            ..Default::default()
        });

        let pattern = query.get_document("email").unwrap().get_str("$regex").unwrap();
        assert_eq!(pattern, r"user\+tag@example\.com");
    }

    #[test]
    fn test_update_document_sets_only_changed_fields() {
        let changes = UserChanges {
            nickname: Some("renamed".to_string()),
            bio: Some(None),
            github_profile_url: Some(Some("https://github.com/renamed".to_string())),
            is_professional: Some(true),
            ..Default::default()
        };

        let update = update_document(&changes);
        let set = update.get_document("$set").unwrap();
        let unset = update.get_document("$unset").unwrap();

        assert_eq!(set.get_str("nickname").unwrap(), "renamed");
        assert_eq!(set.get_str("github_profile_url").unwrap(), "https://github.com/renamed");
        assert!(set.get_bool("is_professional").unwrap());
        assert!(set.contains_key("professional_status_updated_at"));
        assert!(set.contains_key("updated_at"));
        assert!(unset.contains_key("bio"));

        for field in ["is_locked", "failed_login_count", "is_verified", "verification_token", "email"] {
            assert!(!set.contains_key(field), "{} must not be written", field);
        }
    }

    #[test]
    fn test_update_document_without_removals_has_no_unset() {
        let update = update_document(&UserChanges {
            role: Some(UserRole::Manager),
            ..Default::default()
        });

        assert_eq!(update.get_document("$set").unwrap().get_str("role").unwrap(), "MANAGER");
        assert!(!update.contains_key("$unset"));
    }

    #[test]
    fn test_filter_document_date_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        let query = filter_document(&UserFilter::date_range(start, end));
        let range = query.get_document("created_at").unwrap();

        assert_eq!(
            range.get_datetime("$gte").unwrap().timestamp_millis(),
            1_704_067_200_000
        );
        assert_eq!(
            range.get_datetime("$lt").unwrap().timestamp_millis(),
            1_704_067_200_000 + 5 * 86_400_000
        );
    }

    #[test]
    fn test_open_ended_date_range() {
        let filter = UserFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };

        let query = filter_document(&filter);
        let range = query.get_document("created_at").unwrap();

        assert!(range.contains_key("$gte"));
        assert!(!range.contains_key("$lt"));
    }
}
