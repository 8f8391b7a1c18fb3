//! # 에러 처리
//!
//! 사용자 계정 서비스 전역에서 사용하는 에러 타입입니다.
//! 모든 연산은 `AppResult<T>`를 반환하며, 예상 가능한 실패(검증 실패, 미존재,
//! 중복, 인증 실패)와 인프라 장애(데이터베이스, 캐시, 외부 서비스)를
//! 타입으로 구분합니다.
//!
//! ## 에러 분류
//!
//! | AppError | 분류 | 사용 시나리오 |
//! |----------|------|---------------|
//! | `ValidationError` | 예상된 실패 | 닉네임/이메일/비밀번호 형식 오류 |
//! | `NotFound` | 예상된 실패 | 존재하지 않는 사용자 ID |
//! | `ConflictError` | 예상된 실패 | 이메일/닉네임 중복 |
//! | `AuthenticationError` | 예상된 실패 | 잘못된 이메일 또는 비밀번호 |
//! | `AccountLocked` | 예상된 실패 | 로그인 실패 횟수 초과로 잠긴 계정 |
//! | `EmailNotVerified` | 예상된 실패 | 이메일 인증 전 로그인 시도 |
//! | `DatabaseError` | 인프라 장애 | MongoDB 연결/쿼리 오류 |
//! | `RedisError` | 인프라 장애 | 캐시 오류 |
//! | `ExternalServiceError` | 인프라 장애 | 메일 API 오류 |
//! | `InternalError` | 인프라 장애 | 해싱 실패 등 예상치 못한 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, ErrorContext};
//!
//! let hash = bcrypt::hash(&password, cost).context("비밀번호 해싱 실패")?;
//!
//! let user = repo.find_by_id(id).await?
//!     .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id)))?;
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("데이터베이스 오류: {0}")]
    DatabaseError(String),

    #[error("캐시 오류: {0}")]
    RedisError(String),

    #[error("입력값 검증 실패: {0}")]
    ValidationError(String),

    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    #[error("중복: {0}")]
    ConflictError(String),

    #[error("인증 실패: {0}")]
    AuthenticationError(String),

    #[error("계정 잠김: {0}")]
    AccountLocked(String),

    #[error("이메일 미인증: {0}")]
    EmailNotVerified(String),

    #[error("외부 서비스 오류: {0}")]
    ExternalServiceError(String),

    #[error("내부 오류: {0}")]
    InternalError(String),
}

impl AppError {
    /// 호출자가 처리해야 할 정상적인 실패가 아닌, 저장소/외부 시스템 장애인지 확인합니다.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::RedisError(_)
                | AppError::ExternalServiceError(_)
                | AppError::InternalError(_)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(error: redis::RedisError) -> Self {
        AppError::RedisError(error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// bcrypt 등 `AppError`로 직접 변환되지 않는 에러에 설명을 붙여 `InternalError`로 감쌉니다.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F: FnOnce() -> String>(self, describe: F) -> AppResult<T>;
}

impl<T, E: std::fmt::Display> ErrorContext<T> for Result<T, E> {
    fn context(self, msg: &str) -> AppResult<T> {
        self.with_context(|| msg.to_owned())
    }

    fn with_context<F: FnOnce() -> String>(self, describe: F) -> AppResult<T> {
        self.map_err(|cause| AppError::InternalError(format!("{} ({})", describe(), cause)))
    }
}
