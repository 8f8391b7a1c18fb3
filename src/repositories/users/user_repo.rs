//! # 사용자 리포지토리 계약
//!
//! 서비스 계층이 의존하는 사용자 저장소 인터페이스입니다.
//! 구현체는 MongoDB 기반 [`MongoUserRepository`](super::mongo_user_repo::MongoUserRepository)와
//! 개발/테스트용 [`InMemoryUserRepository`](super::memory_user_repo::InMemoryUserRepository)가 있습니다.
//!
//! ## 공통 규칙
//!
//! - **미존재는 에러가 아님**: 조회는 `Ok(None)`, 삭제는 `Ok(false)`를 반환합니다.
//! - **유니크 제약**: `email`, `nickname` 중복은 `AppError::ConflictError`로 보고합니다.
//! - **필드 단위 쓰기**: 레코드 전체를 교체하지 않습니다. 각 쓰기 연산은 자신이 바꾸는
//!   필드만 원자적으로 갱신하므로, 동시에 진행된 잠금/실패 횟수 변경을 덮어쓰지 않습니다.
//! - **정렬**: 목록/검색 결과는 (`created_at`, `id`) 오름차순입니다.
//! - **인프라 장애**: 연결/쿼리 오류만 `DatabaseError` 등으로 전파됩니다.

use std::num::NonZeroU32;

use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::domain::dto::users::request::UserFilter;
use crate::domain::entities::users::user::{User, UserChanges};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 새 사용자 저장. 이메일/닉네임 중복 시 `ConflictError`.
    async fn create(&self, user: User) -> AppResult<User>;

    /// 지정된 필드만 변경. 대상이 없으면 `Ok(None)`.
    async fn update(&self, id: &str, changes: &UserChanges) -> AppResult<Option<User>>;

    async fn set_password(&self, id: &str, hashed_password: &str) -> AppResult<Option<User>>;

    /// 로그인 실패 횟수를 원자적으로 1 증가시키고,
    /// `max_login_attempts`에 도달하면 계정을 잠급니다.
    async fn increment_failed_login(&self, id: &str, max_login_attempts: NonZeroU32) -> AppResult<Option<User>>;

    /// 잠기지 않은 계정의 실패 횟수를 0으로 되돌리고 마지막 로그인 시간을 기록합니다.
    /// 계정이 없거나 그 사이 잠겼다면 `Ok(None)`.
    async fn record_login_success(&self, id: &str) -> AppResult<Option<User>>;

    /// 잠긴 계정만 해제합니다. 잠겨 있지 않거나 없으면 `Ok(None)`.
    async fn unlock(&self, id: &str) -> AppResult<Option<User>>;

    /// 저장된 인증 토큰이 `token`과 정확히 일치할 때만 인증 완료 처리합니다.
    /// 불일치, 토큰 없음, 미존재는 모두 `Ok(None)`.
    async fn consume_verification_token(&self, id: &str, token: &str) -> AppResult<Option<User>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;

    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<User>>;

    async fn search(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    async fn count(&self) -> AppResult<u64>;
}
