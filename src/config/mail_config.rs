//! SMTP 메일 발송 설정

use std::env;

/// 비밀번호 재설정 메일 발송에 사용되는 SMTP 설정
pub struct MailConfig;

impl MailConfig {
    /// SMTP 호스트. 설정되지 않으면 메일 발송이 비활성화됩니다.
    pub fn host() -> Option<String> {
        non_empty("MAIL_HOST")
    }

    /// SMTP 포트. 기본값: 587 (STARTTLS)
    pub fn port() -> u16 {
        env::var("MAIL_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(587)
    }

    pub fn user() -> Option<String> {
        non_empty("MAIL_USER")
    }

    pub fn password() -> Option<String> {
        non_empty("MAIL_PASSWORD")
    }

    /// 발신자 주소 (`"GDash <no-reply@gdash.dev>"` 형식 허용)
    pub fn from() -> Option<String> {
        non_empty("MAIL_FROM")
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
