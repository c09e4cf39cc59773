//! 비밀번호 재설정 메일 서비스
//!
//! HTML 본문은 `templates/email/reset-password.hbs`를 Handlebars(strict 모드)로 렌더링하며,
//! 발송은 lettre의 Tokio 기반 비동기 SMTP 트랜스포트를 사용합니다.
//! `MAIL_HOST`/`MAIL_FROM`이 없으면 발송 시 `ExternalServiceError`를 반환합니다.

use handlebars::Handlebars;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::json;
use singleton_macro::service;

use crate::config::{MailConfig, PasswordResetConfig};
use crate::core::errors::{AppError, ErrorContext};

const RESET_TEMPLATE_NAME: &str = "reset-password";
const RESET_TEMPLATE: &str = include_str!("../../../templates/email/reset-password.hbs");
pub const RESET_SUBJECT: &str = "🔐 Recuperação de Senha - GDash";

#[service(name = "mail")]
pub struct MailService {
    // 외부 의존성 없음
}

/// 재설정 메일 HTML 렌더링
pub fn render_reset_email(name: &str, reset_url: &str) -> Result<String, AppError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string(RESET_TEMPLATE_NAME, RESET_TEMPLATE)
        .context("메일 템플릿 등록 실패")?;

    registry
        .render(
            RESET_TEMPLATE_NAME,
            &json!({
                "name": name,
                "resetUrl": reset_url,
                "expiresMinutes": PasswordResetConfig::ttl_seconds() / 60,
            }),
        )
        .context("메일 템플릿 렌더링 실패")
}

pub fn build_message(from: &str, to: &str, subject: &str, html: String) -> Result<Message, AppError> {
    let from: Mailbox = from
        .parse()
        .map_err(|e| AppError::ExternalServiceError(format!("잘못된 발신자 주소: {}", e)))?;
    let to: Mailbox = to
        .parse()
        .map_err(|e| AppError::ExternalServiceError(format!("잘못된 수신자 주소: {}", e)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html)
        .map_err(|e| AppError::ExternalServiceError(format!("메일 생성 실패: {}", e)))
}

impl MailService {
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, AppError> {
        let host = MailConfig::host()
            .ok_or_else(|| AppError::ExternalServiceError("MAIL_HOST가 설정되지 않았습니다".to_string()))?;

        let tls = TlsParameters::new(host.clone())
            .map_err(|e| AppError::ExternalServiceError(format!("SMTP TLS 설정 실패: {}", e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(MailConfig::port())
            .tls(Tls::Opportunistic(tls));

        if let (Some(user), Some(password)) = (MailConfig::user(), MailConfig::password()) {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Ok(builder.build())
    }

    pub async fn send_password_reset(&self, to: &str, name: &str, reset_url: &str) -> Result<(), AppError> {
        let from = MailConfig::from()
            .ok_or_else(|| AppError::ExternalServiceError("MAIL_FROM이 설정되지 않았습니다".to_string()))?;

        let html = render_reset_email(name, reset_url)?;
        let message = build_message(&from, to, RESET_SUBJECT, html)?;

        self.transport()?
            .send(message)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 실패: {}", e)))?;

        log::info!("📧 비밀번호 재설정 메일 발송: {}", to);
        Ok(())
    }
}
