//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 전역 상태 없이 생성 시점에 저장소, 메일 발송기, 설정을 주입받습니다.
//!
//! # Features
//!
//! - 사용자 생명주기 관리 (생성, 조회, 수정, 삭제)
//! - 로그인 실패 횟수 기반 계정 잠금/해제
//! - 이메일 인증과 비밀번호 재설정
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::config::Settings;
//! use crate::repositories::users::InMemoryUserRepository;
//! use crate::services::{email::LogEmailService, users::UserService};
//!
//! let settings = Settings::load();
//! let user_service = UserService::new(
//!     Arc::new(InMemoryUserRepository::new()),
//!     Arc::new(LogEmailService::new(settings.server_base_url.clone())),
//!     settings,
//! );
//! ```

pub mod users;
pub mod email;
