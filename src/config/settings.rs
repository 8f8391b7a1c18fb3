//! 서비스 설정과 부트스트랩 유틸리티
//!
//! [`Settings`]는 `UserService` 생성 시 명시적으로 전달되는 설정 묶음입니다.
//! 전역 상태를 직접 읽지 않도록, 환경 변수는 여기서 한 번만 읽습니다.

use std::num::NonZeroU32;

use env_logger::Env;
use log::{error, info};

use super::{Environment, LoginPolicyConfig, PasswordConfig, ServerConfig, DEFAULT_MAX_LOGIN_ATTEMPTS};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// 계정이 잠기기까지 허용되는 연속 로그인 실패 횟수 (1 이상)
    pub max_login_attempts: NonZeroU32,
    /// bcrypt 해싱 비용 ([`BCRYPT_COST_RANGE`](super::BCRYPT_COST_RANGE), 4-15)
    pub bcrypt_cost: u32,
    /// 이메일 인증 링크의 기준 URL
    pub server_base_url: String,
}

impl Settings {
    pub fn from_env() -> Self {
        let settings = Self {
            max_login_attempts: LoginPolicyConfig::max_login_attempts(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            server_base_url: ServerConfig::base_url(),
        };

        info!("설정 로드됨: {:?}", settings);
        settings
    }

    /// 프로필별 .env 파일을 읽은 뒤 환경 변수에서 설정을 구성합니다.
    pub fn load() -> Self {
        load_env_file();
        Self::from_env()
    }
}

/// `BCRYPT_COST`를 제외한 기본값. bcrypt 비용은 `ENVIRONMENT`별 기본값을 따릅니다.
impl Default for Settings {
    fn default() -> Self {
        Self {
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
            bcrypt_cost: Environment::current().default_bcrypt_cost(),
            server_base_url: "http://localhost:8000".to_string(),
        }
    }
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
pub fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv::dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 info 레벨을 사용합니다. 여러 번 호출해도 안전합니다.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BCRYPT_COST_RANGE;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.max_login_attempts.get(), 3);
        assert_eq!(settings.bcrypt_cost, Environment::current().default_bcrypt_cost());
        assert!(BCRYPT_COST_RANGE.contains(&settings.bcrypt_cost));
        assert_eq!(settings.server_base_url, "http://localhost:8000");
    }

    #[test]
    fn test_settings_from_env_are_usable() {
        init_logging();
        let settings = Settings::from_env();

        assert!(settings.max_login_attempts.get() > 0);
        assert!(BCRYPT_COST_RANGE.contains(&settings.bcrypt_cost));
        assert!(!settings.server_base_url.ends_with('/'));
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
