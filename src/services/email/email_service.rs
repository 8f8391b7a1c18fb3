//! # 이메일 인증 메일 발송 서비스
//!
//! 가입 직후 사용자에게 인증 링크를 전달하는 알림 계층입니다.
//! `UserService`는 [`EmailService`] trait에만 의존하므로 실행 환경에 따라
//! 구현체를 바꿔 끼울 수 있습니다.
//!
//! | 구현체 | 용도 |
//! |--------|------|
//! | [`HttpEmailService`] | JSON 메일 API로 실제 발송 (`EMAIL_API_URL`) |
//! | [`LogEmailService`] | 발송 대신 인증 링크를 로그로 출력 (개발 환경) |
//!
//! ## 인증 링크 형식
//!
//! ```text
//! {SERVER_BASE_URL}/verify-email/{user_id}/{token}
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::EmailConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::User;

#[async_trait]
pub trait EmailService: Send + Sync {
    /// 사용자의 `verification_token`으로 인증 링크를 만들어 발송합니다.
    async fn send_verification_email(&self, user: &User) -> AppResult<()>;
}

/// 인증 링크 생성. 경로 구성 요소는 퍼센트 인코딩됩니다.
pub fn verification_link(base_url: &str, user_id: &str, token: &str) -> String {
    format!(
        "{}/verify-email/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(user_id),
        urlencoding::encode(token)
    )
}

fn token_of(user: &User) -> AppResult<&str> {
    user.verification_token.as_deref().ok_or_else(|| {
        AppError::InternalError(format!("인증 토큰이 없는 사용자입니다: {}", user.id))
    })
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

/// JSON 메일 API 클라이언트
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
    from_address: String,
    base_url: String,
}

impl HttpEmailService {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from_address: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            from_address: from_address.into(),
            base_url: base_url.into(),
        }
    }

    /// `EMAIL_API_URL`이 없으면 `None`을 반환합니다.
    pub fn from_env(base_url: impl Into<String>) -> Option<Self> {
        let api_url = EmailConfig::api_url()?;
        Some(Self::new(
            api_url,
            EmailConfig::api_key(),
            EmailConfig::from_address(),
            base_url,
        ))
    }
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_verification_email(&self, user: &User) -> AppResult<()> {
        let link = verification_link(&self.base_url, &user.id, token_of(user)?);

        let payload = MailRequest {
            from: &self.from_address,
            to: &user.email,
            subject: "이메일 주소를 인증해주세요",
            text: format!(
                "안녕하세요 {}님,\n\n아래 링크를 열어 이메일 인증을 완료해주세요.\n\n{}\n",
                user.nickname, link
            ),
        };

        let mut request = self.client.post(&self.api_url).json(&payload);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 API 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("메일 API 오류 응답 ({}): {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "메일 API 응답 오류: {}",
                status
            )));
        }

        log::info!("인증 메일 발송: {}", user.email);
        Ok(())
    }
}

/// 인증 링크를 로그로만 남기는 구현체
#[derive(Debug, Clone)]
pub struct LogEmailService {
    base_url: String,
}

impl LogEmailService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

#[async_trait]
impl EmailService for LogEmailService {
    async fn send_verification_email(&self, user: &User) -> AppResult<()> {
        let link = verification_link(&self.base_url, &user.id, token_of(user)?);
        log::info!("📧 인증 메일 ({}): {}", user.email, link);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::UserRole;

    #[test]
    fn test_verification_link() {
        assert_eq!(
            verification_link("http://localhost:8000/", "abc-123", "tok_en-1"),
            "http://localhost:8000/verify-email/abc-123/tok_en-1"
        );
        assert_eq!(
            verification_link("https://example.com", "id", "a b/c"),
            "https://example.com/verify-email/id/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_log_email_service_requires_token() {
        let service = LogEmailService::new("http://localhost:8000");
        let mut user = User::new(
            "mailer".to_string(),
            "mailer@example.com".to_string(),
            "hash".to_string(),
            UserRole::Anonymous,
        );

        assert!(matches!(
            service.send_verification_email(&user).await,
            Err(AppError::InternalError(_))
        ));

        user.verification_token = Some("token".to_string());
        assert!(service.send_verification_email(&user).await.is_ok());
    }
}
