//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 서비스 계층은 [`UserRepository`](users::UserRepository) trait에만 의존하며,
//! 구현체는 생성 시점에 명시적으로 주입됩니다.
//!
//! # Features
//!
//! - MongoDB 주 저장소 + 선택적 Redis 조회 캐시
//! - 개발/테스트용 메모리 저장소
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{InMemoryUserRepository, UserRepository};
//!
//! let user_repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
