//! 인증 서비스
//!
//! 로컬 로그인/가입, Google 로그인과 가입 완료, 비밀번호 재설정 흐름을 조합합니다.
//! 인증에 성공하면 사용자의 도시를 수집기에 알리며, 수집기 장애는 인증 결과에
//! 영향을 주지 않습니다.

use std::sync::Arc;

use singleton_macro::service;

use crate::config::{AuthProvider, FrontendConfig};
use crate::core::errors::AppError;
use crate::domain::dto::users::request::{CreateUser, RegisterRequest};
use crate::domain::dto::users::response::{AuthResponse, AuthUser, GoogleLoginResult, PendingGoogleUser};
use crate::domain::entities::users::{User, UserRole};
use crate::domain::models::oauth::GoogleProfile;
use crate::services::auth::TokenService;
use crate::services::collector::CollectorService;
use crate::services::mail::MailService;
use crate::services::users::UserService;

fn invalid_credentials() -> AppError {
    AppError::AuthenticationError("Credenciais inválidas".to_string())
}

/// 다른 로그인 방식으로 가입된 계정에 비밀번호 로그인을 시도한 경우의 메시지
pub fn linked_provider_message(provider: AuthProvider) -> String {
    format!("Este email está vinculado ao login com {}", provider)
}

/// `{FRONTEND_URL}/reset-password?token=...`
pub fn reset_password_url(frontend_url: &str, token: &str) -> String {
    format!("{}/reset-password?token={}", frontend_url, urlencoding::encode(token))
}

#[service(name = "auth")]
pub struct AuthService {
    user_service: Arc<UserService>,
    token_service: Arc<TokenService>,
    collector: Arc<CollectorService>,
    mail: Arc<MailService>,
}

impl AuthService {
    fn auth_response(&self, user: &User) -> Result<AuthResponse, AppError> {
        Ok(AuthResponse {
            access_token: self.token_service.generate_access_token(user)?,
            user: AuthUser::from(user),
        })
    }

    /// 이메일/비밀번호 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 알 수 없는 이메일, 비밀번호 불일치, 또는 OAuth 계정
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_service
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !user.can_authenticate_with_password() {
            return Err(AppError::AuthenticationError(linked_provider_message(user.provider)));
        }

        if !self.user_service.validate_password(&user, password) {
            log::warn!("🚫 로그인 실패 (비밀번호 불일치): {}", user.email);
            return Err(invalid_credentials());
        }

        log::info!("✅ 로그인: {}", user.email);
        self.collector.spawn_collection(user.city.clone());

        self.auth_response(&user)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let user = self.user_service.create(CreateUser::from(request)).await?;

        self.collector.spawn_collection(user.city.clone());

        self.auth_response(&user)
    }

    /// Google 프로필로 로그인
    ///
    /// 기존 Google 사용자는 바로 토큰을 받고, 처음 보는 사용자는 도시 입력을 위한
    /// 임시 토큰을 받습니다. 같은 이메일의 로컬 계정이 있으면 거부합니다.
    pub async fn google_login(&self, profile: GoogleProfile) -> Result<GoogleLoginResult, AppError> {
        if let Some(user) = self.user_service.find_by_google_id(&profile.google_id).await? {
            log::info!("✅ Google 로그인: {}", user.email);
            self.collector.spawn_collection(user.city.clone());
            return Ok(GoogleLoginResult::Authenticated(self.auth_response(&user)?));
        }

        if self.user_service.find_by_email(&profile.email).await?.is_some() {
            return Err(AppError::ValidationError(
                "Este email já está cadastrado. Use login com email/senha.".to_string(),
            ));
        }

        let temp_token = self.token_service.generate_temp_token(&profile)?;

        Ok(GoogleLoginResult::NeedsCity {
            needs_city: true,
            temp_token,
            user: PendingGoogleUser {
                name: profile.name,
                email: profile.email,
                picture: profile.picture,
            },
        })
    }

    /// 임시 토큰과 도시로 Google 가입을 완료합니다. 어떤 실패든 401로 응답합니다.
    pub async fn complete_google_registration(&self, temp_token: &str, city: &str) -> Result<AuthResponse, AppError> {
        self.try_complete_google_registration(temp_token, city)
            .await
            .map_err(|e| {
                log::warn!("⚠️ Google 가입 완료 실패: {}", e);
                AppError::AuthenticationError("Token temporário inválido ou expirado".to_string())
            })
    }

    async fn try_complete_google_registration(&self, temp_token: &str, city: &str) -> Result<AuthResponse, AppError> {
        let profile = self.token_service.verify_temp_token(temp_token)?.google_user;

        let user = self
            .user_service
            .create(CreateUser {
                name: profile.name,
                email: profile.email,
                password: None,
                city: city.to_string(),
                role: UserRole::User,
                provider: AuthProvider::Google,
                google_id: Some(profile.google_id),
                picture: profile.picture,
            })
            .await?;

        self.collector.spawn_collection(user.city.clone());

        self.auth_response(&user)
    }

    /// 재설정 메일 발송
    ///
    /// 가입 여부를 노출하지 않도록 알 수 없는 이메일도 성공으로 처리합니다.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let (token, user) = match self.user_service.set_reset_password_token(email).await {
            Ok(issued) => issued,
            Err(AppError::NotFound(_)) => {
                log::warn!("⚠️ 비밀번호 재설정 요청: 등록되지 않은 이메일 {}", email);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let reset_url = reset_password_url(&FrontendConfig::url(), &token);
        self.mail.send_password_reset(&user.email, &user.name, &reset_url).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        self.user_service.reset_password(token, new_password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_provider_message() {
        assert_eq!(
            linked_provider_message(AuthProvider::Google),
            "Este email está vinculado ao login com google"
        );
    }

    #[test]
    fn test_reset_password_url() {
        assert_eq!(
            reset_password_url("http://localhost:5173", "abc123"),
            "http://localhost:5173/reset-password?token=abc123"
        );
    }
}
