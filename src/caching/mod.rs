//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 읽기 캐시와 JSON 기반 객체 직렬화를 제공합니다.
//! [`MongoUserRepository`](crate::repositories::users::MongoUserRepository)가
//! ID 기준 사용자 조회 결과를 캐싱하는 데 사용합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! let generation = cache.incr_with_expiry("user:123:generation", 1200).await?;
//! let key = format!("user:123:v{}", generation);
//! cache.set_with_expiry(&key, &user, 600).await?;
//!
//! let cached_user: Option<User> = cache.get(&key).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
