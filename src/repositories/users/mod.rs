//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`UserRepository`] 계약과 두 가지 구현체를 제공합니다.
//!
//! - [`MongoUserRepository`]: MongoDB 저장 + Redis 캐싱
//! - [`InMemoryUserRepository`]: 프로세스 메모리 저장 (개발/테스트용)

pub mod user_repo;
pub mod mongo_user_repo;
pub mod memory_user_repo;

pub use user_repo::UserRepository;
pub use mongo_user_repo::MongoUserRepository;
pub use memory_user_repo::InMemoryUserRepository;
