//! 사용자 검색 필터
//!
//! 모든 조건은 AND로 결합되며, 지정되지 않은 조건은 결과를 제한하지 않습니다.
//!
//! | 필드 | 매칭 방식 |
//! |------|-----------|
//! | `username` | 닉네임 부분 일치 (대소문자 무시) |
//! | `email` | 이메일 부분 일치 (대소문자 무시) |
//! | `role` | 정확히 일치 |
//! | `account_status` | `locked` → 잠긴 계정, `unlocked` → 잠기지 않은 계정 |
//! | `start_date` / `end_date` | `created_at`의 UTC 날짜 기준, 양 끝 포함 |

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::{User, UserRole};
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Locked,
    Unlocked,
}

impl AccountStatus {
    pub fn is_locked(&self) -> bool {
        matches!(self, AccountStatus::Locked)
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "locked" => Ok(AccountStatus::Locked),
            "unlocked" => Ok(AccountStatus::Unlocked),
            _ => Err(format!("Unsupported account status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFilter {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub account_status: Option<AccountStatus>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl UserFilter {
    pub fn username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn role(role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    pub fn account_status(status: AccountStatus) -> Self {
        Self {
            account_status: Some(status),
            ..Default::default()
        }
    }

    pub fn date_range(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        }
    }

    /// 메모리 상의 사용자에 필터를 적용합니다.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(ref username) = self.username {
            if !contains_ignore_case(&user.nickname, username) {
                return false;
            }
        }
        if let Some(ref email) = self.email {
            if !contains_ignore_case(&user.email, email) {
                return false;
            }
        }
        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }
        if let Some(status) = self.account_status {
            if user.is_locked != status.is_locked() {
                return false;
            }
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(created) = user.created_date() else {
                return false;
            };
            if self.start_date.is_some_and(|start| created < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| created > end) {
                return false;
            }
        }
        true
    }

    /// 날짜 범위를 `created_at` 밀리초 경계로 변환합니다.
    ///
    /// 반환값은 (시작일 00:00 UTC 포함, 종료일 다음날 00:00 UTC 미포함)입니다.
    pub fn created_at_bounds_millis(&self) -> (Option<i64>, Option<i64>) {
        let start = self.start_date.and_then(start_of_day_millis);
        let end = self
            .end_date
            .and_then(|end| end.checked_add_signed(Duration::days(1)))
            .and_then(start_of_day_millis);
        (start, end)
    }
}

fn start_of_day_millis(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
