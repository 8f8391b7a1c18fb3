//! 인증 메일 발송 서비스 모듈

pub mod email_service;

pub use email_service::{verification_link, EmailService, HttpEmailService, LogEmailService};
