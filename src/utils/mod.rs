//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 정리, 역직렬화 헬퍼
//! - [`nickname_gen`] - 닉네임 자동 생성
//! - [`token_utils`] - 이메일 인증 토큰 생성

pub mod string_utils;
pub mod nickname_gen;
pub mod token_utils;
