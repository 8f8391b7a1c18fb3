//! 사용자 응답 DTO 모듈
//!
//! 엔티티에서 민감 정보(비밀번호 해시, 인증 토큰, 로그인 실패 횟수)를 제외한
//! 외부 노출용 프로젝션을 제공합니다.

pub mod user_response;

pub use user_response::UserResponse;
