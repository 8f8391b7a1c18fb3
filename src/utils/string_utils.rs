//! # 문자열 유틸리티
//!
//! 프로필 입력값과 검색 필터 문자열 정리에 쓰이는 헬퍼들입니다.

use serde::Deserialize;

/// 앞뒤 공백을 제거하고, 남는 내용이 없으면 `None`으로 바꿉니다.
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Rustacean  ".into())), Some("Rustacean".into()));
/// assert_eq!(clean_optional_string(Some("   ".into())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// `#[serde(deserialize_with = "deserialize_optional_string")]`용 역직렬화 함수
///
/// 검색 필터에서 빈 문자열(`?username=`)을 "조건 없음"으로 취급하기 위해 사용합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(clean_optional_string)
}
