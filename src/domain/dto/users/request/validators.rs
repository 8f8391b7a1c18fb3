//! 요청 DTO에서 공통으로 사용하는 커스텀 검증 함수

use validator::ValidationError;

/// 닉네임 문자 제약 검증
///
/// 알파벳, 숫자, 언더스코어(_), 하이픈(-)만 허용합니다.
/// 길이 제약은 각 필드의 `length` 규칙에서 처리합니다.
///
/// ```rust,ignore
/// assert!(validate_nickname("clever_fox_042").is_ok());
/// assert!(validate_nickname("john-doe").is_ok());
/// assert!(validate_nickname("john doe").is_err());   // 공백 불허
/// assert!(validate_nickname("john@doe").is_err());   // @ 불허
/// ```
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    if !nickname
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::new("invalid_nickname")
            .with_message("닉네임은 알파벳, 숫자, 언더스코어, 하이픈만 사용 가능합니다".into()));
    }
    Ok(())
}

/// 비밀번호 보안 강도 검증
///
/// 대문자, 소문자, 숫자를 각각 최소 1개 이상 포함해야 합니다.
/// 최소 길이는 필드의 `length` 규칙에서 처리합니다.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_nickname() {
        assert!(validate_nickname("john_doe123").is_ok());
        assert!(validate_nickname("brave-otter-7").is_ok());

        assert!(validate_nickname("user name").is_err());
        assert!(validate_nickname("user@domain").is_err());
        assert!(validate_nickname("닉네임").is_err());
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("ValidPassword123!").is_ok());
        assert!(validate_password_strength("MySuperPassword$1234").is_ok());

        assert!(validate_password_strength("password123").is_err()); // 대문자 없음
        assert!(validate_password_strength("PASSWORD123").is_err()); // 소문자 없음
        assert!(validate_password_strength("MyPassword").is_err()); // 숫자 없음
    }
}
