//! 메일 발송 모듈 (비밀번호 재설정 안내)

pub mod mail_service;

pub use mail_service::MailService;
