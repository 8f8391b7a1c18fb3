//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티 [`User`](user::User)와 권한 [`UserRole`](user::UserRole)을 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::{User, UserRole};
//!
//! let user = User::new(
//!     "clever_fox_042".to_string(),
//!     "user@example.com".to_string(),
//!     hashed_password,
//!     UserRole::Anonymous,
//! );
//! ```

pub mod user;
