//! 데이터 전송 객체(DTO) 모듈
//!
//! 서비스 경계에서 주고받는 요청/응답 구조체를 도메인별로 정의합니다.

pub mod users;

pub use users::*;
