//! 사용자 관리 서비스 모듈
//!
//! 사용자 생명주기와 관련된 비즈니스 로직을 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일/닉네임 중복 방지
//! - 입력값 검증
//! - 연속 로그인 실패 시 계정 잠금

pub mod user_service;

pub use user_service::UserService;
