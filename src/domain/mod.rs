//! 도메인 계층 모듈
//!
//! - [`entities`] - 저장소에 영속되는 핵심 엔티티 (`User`, `UserRole`)
//! - [`dto`] - 서비스 입출력용 요청/응답 구조체

pub mod entities;
pub mod dto;
