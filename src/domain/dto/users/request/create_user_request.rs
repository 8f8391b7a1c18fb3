//! # 사용자 생성 요청 DTO
//!
//! 새로운 사용자 계정 생성을 위한 입력 데이터 구조를 정의합니다.
//!
//! ## 검증 규칙
//!
//! ### 이메일 (`email`)
//! - 표준 이메일 형식 준수
//! - 중복 여부는 서비스/저장소 계층에서 별도 검증
//!
//! ### 닉네임 (`nickname`)
//! - 선택 항목. 생략하면 서비스가 유일한 닉네임을 생성
//! - 길이: 3-50자
//! - 허용 문자: 영문, 숫자, 언더스코어(_), 하이픈(-)
//!
//! ### 비밀번호 (`password`)
//! - 최소 길이: 8자
//! - 필수 포함: 대문자, 소문자, 숫자

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::{validate_nickname, validate_password_strength};
use crate::domain::entities::users::user::UserRole;

/// 새로운 사용자 계정 생성을 위한 요청 DTO
///
/// # JSON 예제
///
/// ```json
/// {
///   "email": "user@example.com",
///   "nickname": "john_doe",
///   "password": "SecurePass123",
///   "role": "AUTHENTICATED"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(
        min = 3,
        max = 50,
        message = "닉네임은 3-50자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_nickname"))]
    pub nickname: Option<String>,

    #[validate(length(
        min = 8,
        message = "비밀번호는 최소 8자 이상이어야 합니다"
    ))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[validate(length(max = 500))]
    pub bio: Option<String>,

    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    pub profile_picture_url: Option<String>,

    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    pub linkedin_profile_url: Option<String>,

    #[validate(url(message = "유효한 URL을 입력해주세요"))]
    pub github_profile_url: Option<String>,

    /// 요청 권한. 셀프 가입(`register_user`)에서는 무시됩니다.
    pub role: Option<UserRole>,
}

impl UserCreate {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}
