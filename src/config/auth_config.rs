//! # Authentication Configuration Module
//!
//! 로그인 잠금 정책, 이메일 인증 링크, 메일 발송 API 관련 설정을 관리합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # 로그인 실패 허용 횟수 (이 횟수에 도달하면 계정 잠금)
//! export MAX_LOGIN_ATTEMPTS="3"
//!
//! # 인증 링크에 사용되는 서버 주소
//! export SERVER_BASE_URL="http://localhost:8000"
//!
//! # 메일 발송 API
//! export EMAIL_API_URL="https://mail.example.com/v1/send"
//! export EMAIL_API_KEY="your-api-key"
//! export EMAIL_FROM="no-reply@example.com"
//! ```

use std::env;
use std::num::NonZeroU32;

pub const DEFAULT_MAX_LOGIN_ATTEMPTS: NonZeroU32 = NonZeroU32::MIN.saturating_add(2);

pub struct LoginPolicyConfig;

impl LoginPolicyConfig {
    pub fn max_login_attempts() -> NonZeroU32 {
        Self::parse_max_login_attempts(env::var("MAX_LOGIN_ATTEMPTS").ok().as_deref())
    }

    /// 0 이나 숫자가 아닌 값은 기본값으로 대체됩니다.
    pub fn parse_max_login_attempts(raw: Option<&str>) -> NonZeroU32 {
        match raw.map(|value| value.trim().parse::<NonZeroU32>()) {
            None => DEFAULT_MAX_LOGIN_ATTEMPTS,
            Some(Ok(attempts)) => attempts,
            Some(Err(_)) => {
                log::warn!(
                    "MAX_LOGIN_ATTEMPTS 파싱 실패: {:?}. 기본값 {} 사용",
                    raw,
                    DEFAULT_MAX_LOGIN_ATTEMPTS
                );
                DEFAULT_MAX_LOGIN_ATTEMPTS
            }
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn base_url() -> String {
        env::var("SERVER_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

pub struct EmailConfig;

impl EmailConfig {
    pub fn api_url() -> Option<String> {
        env::var("EMAIL_API_URL").ok().filter(|url| !url.trim().is_empty())
    }

    pub fn api_key() -> String {
        env::var("EMAIL_API_KEY").unwrap_or_else(|_| {
            log::warn!("EMAIL_API_KEY not set, mail API requests will be unauthenticated");
            String::new()
        })
    }

    pub fn from_address() -> String {
        env::var("EMAIL_FROM").unwrap_or_else(|_| "no-reply@localhost".to_string())
    }
}
