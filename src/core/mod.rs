//! 서비스 전역에서 공유되는 핵심 타입 모듈
//!
//! 현재는 통합 에러 타입 [`AppError`](errors::AppError)와
//! [`AppResult`](errors::AppResult) 별칭을 제공합니다.

pub mod errors;

pub use errors::*;
