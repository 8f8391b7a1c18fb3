//! # Redis 캐시 클라이언트 구현
//!
//! 값을 JSON 문자열로 직렬화하여 만료 시간과 함께 저장합니다.
//! 내부적으로 `ConnectionManager`를 사용하므로 연결이 끊기면 자동으로 재연결되며,
//! 복제본은 같은 멀티플렉싱 연결을 공유합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, ErrorKind, RedisError, RedisResult};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::RedisConfig;

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

fn json_error(action: &'static str, error: serde_json::Error) -> RedisError {
    RedisError::from((ErrorKind::TypeError, action, error.to_string()))
}

impl RedisClient {
    /// `REDIS_URL` 환경 변수로 연결합니다.
    pub async fn new() -> RedisResult<Self> {
        Self::connect(&RedisConfig::url()).await
    }

    pub async fn connect(redis_url: &str) -> RedisResult<Self> {
        let mut manager = Client::open(redis_url)?.get_connection_manager().await?;

        redis::cmd("PING").query_async::<()>(&mut manager).await?;
        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> RedisResult<Option<T>> {
        let mut conn = self.manager.clone();
        let cached: Option<String> = conn.get(key).await?;

        cached
            .map(|json| serde_json::from_str(&json).map_err(|e| json_error("캐시 역직렬화 실패", e)))
            .transpose()
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> RedisResult<()> {
        let json = serde_json::to_string(value).map_err(|e| json_error("캐시 직렬화 실패", e))?;

        let mut conn = self.manager.clone();
        conn.set_ex(key, json, seconds).await
    }

    /// 카운터를 1 증가시키고 만료 시간을 갱신합니다. 증가된 값을 반환합니다.
    pub async fn incr_with_expiry(&self, key: &str, seconds: u64) -> RedisResult<u64> {
        let mut conn = self.manager.clone();
        let (value,): (u64,) = redis::pipe()
            .atomic()
            .incr(key, 1)
            .expire(key, i64::try_from(seconds).unwrap_or(i64::MAX))
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(value)
    }
}
