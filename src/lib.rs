//! 사용자 계정 관리 서비스
//!
//! Rust 기반의 사용자 계정 생명주기 관리 라이브러리입니다.
//! 계정 생성과 이메일 인증, 로그인 실패 횟수 기반 계정 잠금,
//! 비밀번호 재설정, 페이지네이션 목록과 필터 검색을 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 생성/회원가입, 조회, 부분 수정, 삭제
//! - **계정 잠금**: 연속 로그인 실패 시 잠금, 관리자 해제
//! - **이메일 인증**: 인증 토큰 발급 및 메일 발송, 권한 승격
//! - **명시적 의존성 주입**: 저장소/메일 발송기/설정을 생성자로 전달
//! - **MongoDB**: 사용자 데이터 영구 저장
//! - **Redis**: ID 기준 조회 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (UserService)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스 (dyn UserRepository)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use user_account_service::config::{init_logging, Settings};
//! use user_account_service::db::Database;
//! use user_account_service::repositories::users::MongoUserRepository;
//! use user_account_service::services::{email::LogEmailService, users::UserService};
//!
//! init_logging();
//! let settings = Settings::load();
//!
//! let database = Arc::new(Database::new().await?);
//! let user_repo = MongoUserRepository::new(database);
//! user_repo.create_indexes().await?;
//!
//! let user_service = UserService::new(
//!     Arc::new(user_repo),
//!     Arc::new(LogEmailService::new(settings.server_base_url.clone())),
//!     settings,
//! );
//!
//! let user = user_service.register_user(request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
