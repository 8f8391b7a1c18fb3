use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::{User, UserRole};

/// 외부 노출용 사용자 정보
///
/// `hashed_password`, `verification_token`, `failed_login_count`는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub nickname: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub role: UserRole,
    pub is_professional: bool,
    pub is_locked: bool,
    pub is_verified: bool,
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            nickname,
            email,
            first_name,
            last_name,
            bio,
            profile_picture_url,
            linkedin_profile_url,
            github_profile_url,
            role,
            is_professional,
            is_locked,
            is_verified,
            last_login_at,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id,
            nickname,
            email,
            first_name,
            last_name,
            bio,
            profile_picture_url,
            linkedin_profile_url,
            github_profile_url,
            role,
            is_professional,
            is_locked,
            is_verified,
            last_login_at,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_omits_secrets() {
        let mut user = User::new(
            "projection".to_string(),
            "projection@example.com".to_string(),
            "$2b$04$secret_hash".to_string(),
            UserRole::Authenticated,
        );
        user.verification_token = Some("secret_token".to_string());
        let id = user.id.clone();

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(response.id, id);
        assert_eq!(response.role, UserRole::Authenticated);
        assert!(!json.contains("secret_hash"));
        assert!(!json.contains("secret_token"));
        assert!(!json.contains("failed_login_count"));
    }
}
