//! 사용자 정보 수정 / 비밀번호 재설정 요청 DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validators::{validate_nickname, validate_password_strength};
use crate::domain::entities::users::user::UserRole;

/// 부분 수정 요청
///
/// 지정된(`Some`) 필드만 변경합니다. 최소 한 개 이상의 필드가 필요합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_has_changes"))]
pub struct UserUpdate {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

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
    pub password: Option<String>,

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

    pub role: Option<UserRole>,
}

impl UserUpdate {
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.nickname.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.profile_picture_url.is_none()
            && self.linkedin_profile_url.is_none()
            && self.github_profile_url.is_none()
            && self.role.is_none()
    }
}

fn validate_has_changes(update: &UserUpdate) -> Result<(), ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::new("empty_update")
            .with_message("수정할 필드를 최소 한 개 이상 입력해주세요".into()));
    }
    Ok(())
}

/// 비밀번호 재설정 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(
        min = 8,
        message = "비밀번호는 최소 8자 이상이어야 합니다"
    ))]
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_only_update() {
        let update = UserUpdate::email("updated_email@example.com");
        assert!(update.validate().is_ok());
        assert!(!update.is_empty());
    }

    #[test]
    fn test_invalid_email_update() {
        let update = UserUpdate::email("invalidemail");
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let update = UserUpdate::default();
        assert!(update.is_empty());
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_weak_password_update_is_rejected() {
        let update = UserUpdate {
            password: Some("alllowercase1".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_reset_password_request() {
        let ok = ResetPasswordRequest { new_password: "NewPassword123!".to_string() };
        assert!(ok.validate().is_ok());

        let short = ResetPasswordRequest { new_password: "Ab1".to_string() };
        assert!(short.validate().is_err());
    }
}
