//! # Authentication Configuration Module
//!
//! JWT 토큰, Google OAuth 2.0, 비밀번호 재설정 등 인증 관련 설정을 관리하는 모듈입니다.
//! Spring Security의 OAuth2 및 JWT 설정과 유사한 역할을 수행합니다.
//!
//! ## Spring Security 와의 비교
//!
//! | Spring Security | 이 모듈 |
//! |-----------------|---------|
//! | `jwt.secret` | `JwtConfig::secret()` |
//! | `oauth2.client.registration.google` | `GoogleOAuthConfig` |
//! | `spring.security.oauth2.client.provider` | `AuthProvider` |
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_SECONDS="3600"
//!
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_CALLBACK_URL="http://localhost:3000/api/auth/google/callback"
//!
//! export OAUTH_STATE_TTL_SECONDS="600"
//! export GOOGLE_HTTP_TIMEOUT_SECONDS="10"
//! export PASSWORD_RESET_TTL_SECONDS="3600"
//! ```
//!
//! Google 관련 필수 값이 없을 때 기동 시점에 패닉하지 않고,
//! OAuth 플로우를 실제로 사용할 때 [`AppError::InternalError`]를 반환합니다.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;

fn required(key: &str) -> Result<String, AppError> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::InternalError(format!("{} 환경 변수가 설정되지 않았습니다", key)))
}

/// 설정 가능한 최대 기간: 1년
const MAX_SECONDS: i64 = 365 * 24 * 60 * 60;

fn seconds(key: &str, default: i64) -> i64 {
    parse_seconds(env::var(key).ok().as_deref(), default)
}

/// 숫자가 아니거나 0 이하이면 기본값, 1년을 넘으면 1년으로 자릅니다.
fn parse_seconds(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .map(|value| value.min(MAX_SECONDS))
        .unwrap_or(default)
}

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// Google Cloud Console 에서 생성한 OAuth 2.0 클라이언트 정보를 관리합니다.
///
/// ## 보안 고려사항
///
/// - `client_secret`은 절대 클라이언트 사이드에 노출되어서는 안 됩니다
/// - 프로덕션에서는 HTTPS 콜백 URL만 사용하세요
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// Google OAuth Client ID (`GOOGLE_CLIENT_ID`)
    pub fn client_id() -> Result<String, AppError> {
        required("GOOGLE_CLIENT_ID")
    }

    /// Google OAuth Client Secret (`GOOGLE_CLIENT_SECRET`)
    ///
    /// 로그에 출력하지 마세요.
    pub fn client_secret() -> Result<String, AppError> {
        required("GOOGLE_CLIENT_SECRET")
    }

    /// OAuth 인증 완료 후 Google이 리디렉션할 백엔드 콜백 URL
    ///
    /// Google Cloud Console의 승인된 리디렉션 URI 목록에 등록되어 있어야 합니다.
    /// `GOOGLE_CALLBACK_URL`이 우선이고, 없으면 `GOOGLE_REDIRECT_URI`를 확인합니다.
    pub fn callback_url() -> Result<String, AppError> {
        required("GOOGLE_CALLBACK_URL").or_else(|_| required("GOOGLE_REDIRECT_URI"))
    }

    /// 인증(동의 화면) 엔드포인트. 기본값: `https://accounts.google.com/o/oauth2/v2/auth`
    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string())
    }

    /// 토큰 교환 엔드포인트. 기본값: `https://oauth2.googleapis.com/token`
    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    /// 사용자 정보 엔드포인트. 기본값: `https://www.googleapis.com/oauth2/v2/userinfo`
    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }
}

/// JSON Web Token (JWT) 관련 설정을 관리하는 구조체
///
/// 액세스 토큰과 Google 가입 완료용 임시 토큰의 서명 키 및 만료 시간을 제공합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본값을 사용하며 경고 로그를 남깁니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "default-secret-change-me".to_string()
        })
    }

    /// 액세스 토큰 만료 시간(초). 기본값: 3600 (1시간)
    pub fn expiration_seconds() -> i64 {
        seconds("JWT_EXPIRATION_SECONDS", 3600)
    }

    /// Google 가입 완료용 임시 토큰 만료 시간(초). 기본값: 600 (10분)
    pub fn temp_expiration_seconds() -> i64 {
        seconds("JWT_TEMP_EXPIRATION_SECONDS", 600)
    }
}

/// OAuth 일반 설정
///
/// CSRF 방지용 `state` 값은 Redis에 저장되며, 이 TTL이 지나면 콜백이 거부됩니다.
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth state 보관 시간(초). 기본값: 600
    pub fn state_ttl_seconds() -> u64 {
        seconds("OAUTH_STATE_TTL_SECONDS", 600) as u64
    }

    /// Google 토큰/사용자 정보 요청 타임아웃(초). 기본값: 10
    pub fn http_timeout() -> Duration {
        Duration::from_secs(seconds("GOOGLE_HTTP_TIMEOUT_SECONDS", 10) as u64)
    }
}

/// 비밀번호 재설정 토큰 설정
pub struct PasswordResetConfig;

impl PasswordResetConfig {
    /// 재설정 토큰 유효 시간(초). 기본값: 3600 (1시간)
    pub fn ttl_seconds() -> i64 {
        seconds("PASSWORD_RESET_TTL_SECONDS", 3600)
    }
}

/// 사용자 계정의 인증 공급자
///
/// 사용자 문서의 `provider` 필드에 소문자 문자열로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 로컬 이메일/패스워드 인증
    Local,
    /// Google OAuth 2.0 인증
    Google,
}

impl Default for AuthProvider {
    fn default() -> Self {
        AuthProvider::Local
    }
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AuthProvider::Google).unwrap(), "\"google\"");
        let parsed: AuthProvider = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(parsed, AuthProvider::Local);
        assert_eq!(AuthProvider::default(), AuthProvider::Local);
        assert_eq!(AuthProvider::Google.to_string(), "google");
    }

    #[test]
    fn test_parse_seconds_bounds() {
        assert_eq!(parse_seconds(None, 600), 600);
        assert_eq!(parse_seconds(Some("abc"), 600), 600);
        assert_eq!(parse_seconds(Some("0"), 600), 600);
        assert_eq!(parse_seconds(Some("-5"), 600), 600);
        assert_eq!(parse_seconds(Some(" 120 "), 600), 120);
        assert_eq!(parse_seconds(Some("9223372036854775807"), 600), MAX_SECONDS);
    }

    #[test]
    fn test_clamped_ttl_fits_in_millis_and_chrono() {
        let ttl = parse_seconds(Some("9223372036854775807"), 3600);
        assert!(ttl.checked_mul(1000).is_some());
        assert!(chrono::Duration::try_seconds(ttl).is_some());
    }

    #[test]
    fn test_jwt_defaults() {
        if env::var("JWT_EXPIRATION_SECONDS").is_err() {
            assert_eq!(JwtConfig::expiration_seconds(), 3600);
        }
        if env::var("JWT_TEMP_EXPIRATION_SECONDS").is_err() {
            assert_eq!(JwtConfig::temp_expiration_seconds(), 600);
        }
        assert!(!JwtConfig::secret().is_empty());
    }

    #[test]
    fn test_missing_google_setting_is_an_error_not_a_panic() {
        if env::var("GOOGLE_CLIENT_SECRET").is_err() {
            let err = GoogleOAuthConfig::client_secret().unwrap_err();
            assert!(matches!(err, AppError::InternalError(_)));
        }
    }

    #[test]
    fn test_google_endpoint_defaults() {
        if env::var("GOOGLE_TOKEN_URI").is_err() {
            assert_eq!(GoogleOAuthConfig::token_uri(), "https://oauth2.googleapis.com/token");
        }
        if env::var("GOOGLE_USERINFO_URI").is_err() {
            assert!(GoogleOAuthConfig::userinfo_uri().ends_with("/oauth2/v2/userinfo"));
        }
    }
}
