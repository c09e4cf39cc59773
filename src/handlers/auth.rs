//! Authentication HTTP Handlers
//!
//! `/api/auth/*` 엔드포인트입니다. 로컬 로그인/가입, Google OAuth 2.0,
//! 비밀번호 재설정을 처리합니다.
//!
//! | 메서드 | 경로 | 인증 | 응답 |
//! |--------|------|------|------|
//! | `POST` | `/login` | - | 200 `AuthResponse` |
//! | `POST` | `/register` | - | 201 `AuthResponse` |
//! | `GET` | `/google` | - | 302 Google 동의 화면 |
//! | `GET` | `/google/callback` | - | 302 프론트엔드 |
//! | `POST` | `/google/complete` | - | 201 `AuthResponse` |
//! | `GET` | `/profile` | JWT | 200 `{user}` |
//! | `GET` | `/test` | JWT | 200 `{message, user}` |
//! | `POST` | `/forgot-password` | - | 200 `{message}` |
//! | `POST` | `/reset-password` | - | 200 `{message}` |

use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::config::FrontendConfig;
use crate::core::errors::AppError;
use crate::domain::dto::users::request::{
    CompleteGoogleRegistrationRequest, ForgotPasswordRequest, LoginRequest, OAuthCallbackQuery,
    RegisterRequest, ResetPasswordRequest,
};
use crate::domain::dto::users::response::{GoogleLoginResult, MessageResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::{AuthService, GoogleAuthService};

/// Google 로그인 결과에 따라 프론트엔드로 돌려보낼 주소
pub fn callback_redirect_url(frontend_url: &str, result: &GoogleLoginResult) -> String {
    match result {
        GoogleLoginResult::Authenticated(auth) => {
            format!("{}/auth/callback?token={}", frontend_url, auth.access_token)
        }
        GoogleLoginResult::NeedsCity { temp_token, user, .. } => format!(
            "{}/complete-registration?token={}&name={}&email={}",
            frontend_url,
            temp_token,
            urlencoding::encode(&user.name),
            urlencoding::encode(&user.email),
        ),
    }
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/register")]
pub async fn register(payload: web::Json<RegisterRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance().register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/google")]
pub async fn google_login() -> Result<HttpResponse, AppError> {
    let url = GoogleAuthService::instance().authorization_url().await?;
    Ok(redirect(&url))
}

#[get("/google/callback")]
pub async fn google_callback(query: web::Query<OAuthCallbackQuery>) -> Result<HttpResponse, AppError> {
    // 사용자가 동의를 거부했거나 Google 측 오류
    if let Some(ref error) = query.error {
        let description = query
            .error_description
            .as_deref()
            .unwrap_or("Autenticação com Google cancelada ou falhou");
        log::warn!("Google OAuth 에러: {} - {}", error, description);
        return Err(AppError::AuthenticationError(description.to_string()));
    }

    let (Some(code), Some(state)) = (query.code.as_deref(), query.state.as_deref()) else {
        return Err(AppError::ValidationError(
            "Parâmetros code e state são obrigatórios".to_string(),
        ));
    };

    let google_profile = GoogleAuthService::instance().authenticate(code, state).await?;
    let result = AuthService::instance().google_login(google_profile).await?;

    Ok(redirect(&callback_redirect_url(&FrontendConfig::url(), &result)))
}

#[post("/google/complete")]
pub async fn complete_google_registration(
    payload: web::Json<CompleteGoogleRegistrationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance()
        .complete_google_registration(&payload.temp_token, &payload.city)
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/profile", wrap = "AuthMiddleware::required()")]
pub async fn profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}

#[get("/test", wrap = "AuthMiddleware::required()")]
pub async fn protected_test(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "Rota protegida funcionando!",
        "user": user,
    })))
}

#[post("/forgot-password")]
pub async fn forgot_password(payload: web::Json<ForgotPasswordRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    AuthService::instance().forgot_password(&payload.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Se o email existir, você receberá instruções para resetar a senha",
    )))
}

#[post("/reset-password")]
pub async fn reset_password(payload: web::Json<ResetPasswordRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    AuthService::instance()
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Senha redefinida com sucesso! Você já pode fazer login",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::dto::users::response::{AuthResponse, AuthUser, PendingGoogleUser};
    use crate::domain::entities::users::UserRole;
    use actix_web::{http::StatusCode, App};
    use actix_web::test::{TestRequest, call_service, init_service, read_body_json};

    #[test]
    fn test_callback_redirect_for_existing_user() {
        let result = GoogleLoginResult::Authenticated(AuthResponse {
            access_token: "jwt".into(),
            user: AuthUser {
                id: "1".into(),
                name: "Ana".into(),
                email: "ana@gmail.com".into(),
                city: "Recife".into(),
                role: UserRole::User,
                picture: None,
                provider: AuthProvider::Google,
            },
        });

        assert_eq!(
            callback_redirect_url("http://localhost:5173", &result),
            "http://localhost:5173/auth/callback?token=jwt"
        );
    }

    #[test]
    fn test_callback_redirect_for_new_user_encodes_fields() {
        let result = GoogleLoginResult::NeedsCity {
            needs_city: true,
            temp_token: "tmp".into(),
            user: PendingGoogleUser {
                name: "João Silva".into(),
                email: "joao+1@gmail.com".into(),
                picture: None,
            },
        };

        assert_eq!(
            callback_redirect_url("http://front", &result),
            "http://front/complete-registration?token=tmp&name=Jo%C3%A3o%20Silva&email=joao%2B1%40gmail.com"
        );
    }

    #[actix_web::test]
    async fn test_callback_with_provider_error_is_401() {
        let app = init_service(App::new().service(google_callback)).await;

        let req = TestRequest::get()
            .uri("/google/callback?error=access_denied&error_description=Negado")
            .to_request();
        let res = call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["message"], "Negado");
    }

    #[actix_web::test]
    async fn test_callback_without_code_is_400() {
        let app = init_service(App::new().service(google_callback)).await;

        let req = TestRequest::get().uri("/google/callback?state=abc").to_request();
        let res = call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_login_rejects_invalid_email_before_service() {
        let app = init_service(App::new().service(login)).await;

        let req = TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": "nope", "password": "x" }))
            .to_request();
        let res = call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["message"], "Email inválido");
    }
}
