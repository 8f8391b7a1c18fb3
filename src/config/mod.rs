//! # Configuration Module
//!
//! 사용자 계정 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반 설정값을 읽어 [`Settings`]로 묶어 서비스에 명시적으로 전달합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, bcrypt 비용, MongoDB/Redis 접속 정보
//! - [`auth_config`] - 로그인 잠금 정책, 인증 링크, 메일 API 설정
//! - [`settings`] - `Settings`, `.env` 로딩, 로깅 초기화
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use user_account_service::config::{init_logging, Settings};
//!
//! init_logging();
//! let settings = Settings::load();
//! println!("max login attempts: {}", settings.max_login_attempts);
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export ENVIRONMENT="production"   # development, test, staging, production
//! export BCRYPT_COST="12"            # 4-15 범위
//! export MAX_LOGIN_ATTEMPTS="3"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="user_accounts"
//! export REDIS_URL="redis://localhost:6379"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod settings;

pub use data_config::*;
pub use auth_config::*;
pub use settings::*;
