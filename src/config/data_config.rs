//! 데이터 및 환경 설정 관리 모듈
//!
//! 실행 환경, 비밀번호 해싱 비용, MongoDB/Redis 접속 정보를 관리합니다.
//!
//! | 환경 변수 | 기본값 |
//! |-----------|--------|
//! | `ENVIRONMENT` | `production` |
//! | `BCRYPT_COST` | 환경별 (dev/test 4, staging 10, production 12) |
//! | `MONGODB_URI` | `mongodb://localhost:27017` |
//! | `DATABASE_NAME` | `user_accounts_dev` |
//! | `REDIS_URL` | `redis://localhost:6379` |

use std::env;
use std::ops::RangeInclusive;

/// 허용되는 bcrypt 비용 범위. 15를 넘으면 로그인 한 번에 수 초가 걸립니다.
pub const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// 알 수 없는 값이나 미설정은 가장 보수적인 Production으로 간주합니다.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|value| Self::parse(&value))
            .unwrap_or(Environment::Production)
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn default_bcrypt_cost(self) -> u32 {
        match self {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    pub fn bcrypt_cost() -> u32 {
        Self::parse_bcrypt_cost(env::var("BCRYPT_COST").ok().as_deref(), Environment::current())
    }

    /// 범위를 벗어나거나 숫자가 아닌 값은 환경별 기본값으로 대체됩니다.
    pub fn parse_bcrypt_cost(raw: Option<&str>, environment: Environment) -> u32 {
        match raw.map(|value| value.trim().parse::<u32>()) {
            Some(Ok(cost)) if BCRYPT_COST_RANGE.contains(&cost) => cost,
            None => environment.default_bcrypt_cost(),
            Some(_) => {
                let fallback = environment.default_bcrypt_cost();
                log::warn!("BCRYPT_COST 값이 유효하지 않습니다: {:?}. 기본값 {} 사용", raw, fallback);
                fallback
            }
        }
    }
}

pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "user_accounts_dev".to_string())
    }
}

pub struct RedisConfig;

impl RedisConfig {
    pub fn url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("DEV"), Environment::Development);
        assert_eq!(Environment::parse(" testing "), Environment::Test);
        assert_eq!(Environment::parse("stage"), Environment::Staging);
        assert_eq!(Environment::parse("whatever"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_parsing() {
        assert_eq!(PasswordConfig::parse_bcrypt_cost(None, Environment::Test), 4);
        assert_eq!(PasswordConfig::parse_bcrypt_cost(None, Environment::Production), 12);
        assert_eq!(PasswordConfig::parse_bcrypt_cost(Some("8"), Environment::Production), 8);

        // 범위 밖이거나 숫자가 아니면 환경별 기본값
        assert_eq!(PasswordConfig::parse_bcrypt_cost(Some("3"), Environment::Staging), 10);
        assert_eq!(PasswordConfig::parse_bcrypt_cost(Some("31"), Environment::Staging), 10);
        assert_eq!(PasswordConfig::parse_bcrypt_cost(Some("high"), Environment::Development), 4);
    }

    #[test]
    fn test_environment_defaults_are_in_supported_range() {
        for environment in [
            Environment::Development,
            Environment::Test,
            Environment::Staging,
            Environment::Production,
        ] {
            assert!(BCRYPT_COST_RANGE.contains(&environment.default_bcrypt_cost()));
        }
    }

    #[test]
    fn test_bcrypt_cost_is_in_supported_range() {
        assert!(BCRYPT_COST_RANGE.contains(&PasswordConfig::bcrypt_cost()));
    }
}
