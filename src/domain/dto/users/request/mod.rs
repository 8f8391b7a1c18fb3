//! 사용자 요청 DTO 모듈
//!
//! `validator` derive 기반의 입력 검증 규칙을 포함한 요청 구조체들을 제공합니다.
//!
//! - [`UserCreate`] - 계정 생성/가입
//! - [`UserUpdate`] - 부분 수정
//! - [`ResetPasswordRequest`] - 비밀번호 재설정
//! - [`UserFilter`] - 검색 조건

pub mod validators;
pub mod create_user_request;
pub mod update_user_request;
pub mod user_filter;

pub use create_user_request::UserCreate;
pub use update_user_request::{ResetPasswordRequest, UserUpdate};
pub use user_filter::{AccountStatus, UserFilter};
