//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 계정 식별 정보, 프로필, 권한, 로그인 잠금 상태, 이메일 인증 상태를 함께 보관합니다.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자 권한
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// 가입 후 이메일 인증 전
    Anonymous,
    /// 이메일 인증 완료
    Authenticated,
    Manager,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Anonymous => "ANONYMOUS",
            UserRole::Authenticated => "AUTHENTICATED",
            UserRole::Manager => "MANAGER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ANONYMOUS" => Ok(UserRole::Anonymous),
            "AUTHENTICATED" => Ok(UserRole::Authenticated),
            "MANAGER" => Ok(UserRole::Manager),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(format!("Unsupported user role: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자 엔티티
///
/// 시스템의 모든 계정을 표현하는 핵심 도메인 엔티티입니다.
/// `nickname`과 `email`은 전체 시스템에서 유일하며,
/// 비밀번호는 bcrypt 해시로만 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// UUID v4 문자열
    #[serde(rename = "_id")]
    pub id: String,
    /// 닉네임 (unique)
    pub nickname: String,
    /// 이메일 (unique)
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_profile_url: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub is_professional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_status_updated_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    /// 연속 로그인 실패 횟수. 로그인 성공 시 0으로 초기화됩니다.
    #[serde(default)]
    pub failed_login_count: u32,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_verified: bool,
    /// 이메일 인증 토큰 (인증 완료 후 제거)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    pub hashed_password: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 잠기지 않은, 이메일 미인증 상태로 시작합니다.
    pub fn new(nickname: String, email: String, hashed_password: String, role: UserRole) -> Self {
        let now = DateTime::now();

        Self {
            id: Uuid::new_v4().to_string(),
            nickname,
            email,
            first_name: None,
            last_name: None,
            bio: None,
            profile_picture_url: None,
            linkedin_profile_url: None,
            github_profile_url: None,
            role,
            is_professional: false,
            professional_status_updated_at: None,
            last_login_at: None,
            failed_login_count: 0,
            is_locked: false,
            is_verified: false,
            verification_token: None,
            hashed_password,
            created_at: now,
            updated_at: now,
        }
    }

    /// 수정 시간을 현재 시각으로 갱신
    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }

    /// 이메일 인증 완료 처리
    ///
    /// 토큰을 제거하고, 인증 전 권한(ANONYMOUS)은 AUTHENTICATED로 승격합니다.
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification_token = None;
        if self.role == UserRole::Anonymous {
            self.role = UserRole::Authenticated;
        }
        self.touch();
    }

    /// 로그인 성공 처리: 실패 횟수 초기화 및 마지막 로그인 시간 기록
    pub fn record_successful_login(&mut self) {
        self.failed_login_count = 0;
        self.last_login_at = Some(DateTime::now());
        self.touch();
    }

    /// 로그인 실패 처리
    ///
    /// 실패 횟수가 `max_login_attempts`에 도달하면 계정을 잠급니다.
    pub fn record_failed_login(&mut self, max_login_attempts: u32) {
        self.failed_login_count = self.failed_login_count.saturating_add(1);
        if self.failed_login_count >= max_login_attempts {
            self.is_locked = true;
        }
        self.touch();
    }

    pub fn unlock(&mut self) {
        self.is_locked = false;
        self.failed_login_count = 0;
        self.touch();
    }

    pub fn set_professional_status(&mut self, is_professional: bool) {
        self.is_professional = is_professional;
        self.professional_status_updated_at = Some(DateTime::now());
        self.touch();
    }

    /// `created_at`의 UTC 날짜
    pub fn created_date(&self) -> Option<chrono::NaiveDate> {
        chrono::DateTime::from_timestamp_millis(self.created_at.timestamp_millis())
            .map(|created_at| created_at.date_naive())
    }
}

/// 사용자 필드 단위 변경 내역
///
/// 호출자가 소유한 필드만 담습니다. 잠금 상태, 실패 횟수, 이메일 인증 상태는
/// 포함하지 않으므로 이 변경을 저장해도 동시에 적용된 잠금이 덮어써지지 않습니다.
///
/// 프로필 필드의 `Some(None)`은 값 제거를 의미합니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub hashed_password: Option<String>,
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub profile_picture_url: Option<Option<String>>,
    pub linkedin_profile_url: Option<Option<String>>,
    pub github_profile_url: Option<Option<String>>,
    pub role: Option<UserRole>,
    pub is_professional: Option<bool>,
}

impl UserChanges {
    /// `(필드명, 값)` 목록. 저장소별 업데이트 문서 생성에 사용합니다.
    pub fn profile_fields(&self) -> [(&'static str, &Option<Option<String>>); 6] {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("bio", &self.bio),
            ("profile_picture_url", &self.profile_picture_url),
            ("linkedin_profile_url", &self.linkedin_profile_url),
            ("github_profile_url", &self.github_profile_url),
        ]
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
        if let Some(ref nickname) = self.nickname {
            user.nickname = nickname.clone();
        }
        if let Some(ref hashed_password) = self.hashed_password {
            user.hashed_password = hashed_password.clone();
        }

        let profile = [
            (&mut user.first_name, &self.first_name),
            (&mut user.last_name, &self.last_name),
            (&mut user.bio, &self.bio),
            (&mut user.profile_picture_url, &self.profile_picture_url),
            (&mut user.linkedin_profile_url, &self.linkedin_profile_url),
            (&mut user.github_profile_url, &self.github_profile_url),
        ];
        for (field, change) in profile {
            if let Some(value) = change {
                *field = value.clone();
            }
        }

        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(is_professional) = self.is_professional {
            user.set_professional_status(is_professional);
        }

        user.touch();
    }
}
