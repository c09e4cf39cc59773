//! # Google OAuth 2.0 인증 서비스
//!
//! Authorization Code Flow로 Google 프로필을 가져옵니다. 사용자 생성/로그인 판단은
//! [`AuthService::google_login`](crate::services::auth::AuthService::google_login)이 담당합니다.
//!
//! ```text
//! Browser                      gdash_backend                         Google
//!    │ GET /api/auth/google          │                                    │
//!    ├──────────────────────────────►│ state 생성 → Redis(oauth:state:*)   │
//!    │ 302 consent URL               │                                    │
//!    │◄──────────────────────────────┤                                    │
//!    │ 동의 ───────────────────────────────────────────────────────────────►│
//!    │ GET /callback?code&state      │                                    │
//!    ├──────────────────────────────►│ state 소비(GETDEL)                  │
//!    │                               │ POST token_uri (code 교환) ────────►│
//!    │                               │ GET userinfo (Bearer) ─────────────►│
//!    │ 302 frontend                  │                                    │
//!    │◄──────────────────────────────┤                                    │
//! ```
//!
//! ## CSRF 방지
//!
//! `state`는 UUIDv4이며 Redis에 `OAUTH_STATE_TTL_SECONDS` 동안만 존재합니다.
//! 콜백에서 `GETDEL`로 꺼내므로 같은 state는 두 번 사용할 수 없습니다.

use std::sync::Arc;
use std::time::Duration;

use singleton_macro::service;
use uuid::Uuid;

use crate::caching::redis::RedisClient;
use crate::config::{GoogleOAuthConfig, OAuthConfig};
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::models::oauth::{GoogleProfile, GoogleTokenResponse, GoogleUserInfo};

const STATE_KEY_PREFIX: &str = "oauth:state:";
const SCOPE: &str = "openid email profile";

/// 코드 교환에 필요한 클라이언트 자격 증명
#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl GoogleCredentials {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            client_id: GoogleOAuthConfig::client_id()?,
            client_secret: GoogleOAuthConfig::client_secret()?,
            redirect_uri: GoogleOAuthConfig::callback_url()?,
        })
    }
}

fn state_key(state: &str) -> String {
    format!("{}{}", STATE_KEY_PREFIX, state)
}

/// Google 동의 화면 URL
pub fn build_authorization_url(auth_uri: &str, client_id: &str, redirect_uri: &str, state: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&access_type=online&prompt=select_account",
        auth_uri,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(SCOPE),
        urlencoding::encode(state),
    )
}

/// Authorization code → 액세스 토큰 (form POST)
pub async fn exchange_code(
    client: &reqwest::Client,
    token_uri: &str,
    credentials: &GoogleCredentials,
    code: &str,
    timeout: Duration,
) -> Result<GoogleTokenResponse, AppError> {
    let params = [
        ("code", code),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("redirect_uri", credentials.redirect_uri.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let response = client
        .post(token_uri)
        .timeout(timeout)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalServiceError(format!(
            "Google 토큰 교환 실패: {}",
            error_text
        )));
    }

    response
        .json::<GoogleTokenResponse>()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
}

pub async fn fetch_user_info(
    client: &reqwest::Client,
    userinfo_uri: &str,
    access_token: &str,
    timeout: Duration,
) -> Result<GoogleUserInfo, AppError> {
    let response = client
        .get(userinfo_uri)
        .timeout(timeout)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalServiceError(format!(
            "Google 사용자 정보 조회 실패: {}",
            error_text
        )));
    }

    response
        .json::<GoogleUserInfo>()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
}

#[service(name = "googleauth")]
pub struct GoogleAuthService {
    redis: Arc<RedisClient>,
    client: reqwest::Client,
}

impl GoogleAuthService {
    /// state를 발급/저장하고 동의 화면 URL을 반환합니다.
    pub async fn authorization_url(&self) -> Result<String, AppError> {
        let client_id = GoogleOAuthConfig::client_id()?;
        let redirect_uri = GoogleOAuthConfig::callback_url()?;
        let state = Uuid::new_v4().simple().to_string();

        self.redis
            .set_with_expiry(&state_key(&state), &true, OAuthConfig::state_ttl_seconds())
            .await
            .context("OAuth state 저장 실패")?;

        Ok(build_authorization_url(
            &GoogleOAuthConfig::auth_uri(),
            &client_id,
            &redirect_uri,
            &state,
        ))
    }

    /// state를 소비합니다. 없거나 이미 사용된 state는 401.
    async fn consume_state(&self, state: &str) -> Result<(), AppError> {
        let stored = self
            .redis
            .take::<bool>(&state_key(state))
            .await
            .context("OAuth state 조회 실패")?;

        match stored {
            Some(_) => Ok(()),
            None => {
                log::warn!("⚠️ 알 수 없거나 만료된 OAuth state: {}", state);
                Err(AppError::AuthenticationError(
                    "Estado OAuth inválido ou expirado".to_string(),
                ))
            }
        }
    }

    /// 콜백의 `code`/`state`로 Google 프로필을 가져옵니다.
    pub async fn authenticate(&self, code: &str, state: &str) -> Result<GoogleProfile, AppError> {
        self.consume_state(state).await?;

        let credentials = GoogleCredentials::from_env()?;
        let timeout = OAuthConfig::http_timeout();
        let token = exchange_code(&self.client, &GoogleOAuthConfig::token_uri(), &credentials, code, timeout).await?;
        let info = fetch_user_info(&self.client, &GoogleOAuthConfig::userinfo_uri(), &token.access_token, timeout).await?;

        log::info!("🔐 Google 인증 성공: {}", info.email);
        Ok(GoogleProfile::from(info))
    }
}
