//! 인증 및 보안 서비스 모듈
//!
//! JWT 발급/검증, Google OAuth 2.0, 로컬 로그인과 비밀번호 재설정 흐름을 제공합니다.
//!
//! # Security
//!
//! - HMAC-SHA256(HS256) 토큰 서명
//! - CSRF 방지 (Redis에 저장되는 일회용 OAuth state)
//! - 재설정 토큰은 SHA-256 다이제스트로만 저장
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthService, GoogleAuthService};
//!
//! let response = AuthService::instance().login("ana@example.com", "segredo").await?;
//! let consent_url = GoogleAuthService::instance().authorization_url().await?;
//! ```

pub mod auth_service;
pub mod google_auth_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use google_auth_service::GoogleAuthService;
pub use token_service::TokenService;
