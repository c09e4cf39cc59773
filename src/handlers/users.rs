//! # User Management HTTP Handlers
//!
//! `/api/users/*` 엔드포인트입니다. 스코프 전체가 `AuthMiddleware::required()`로
//! 감싸져 있어 모든 핸들러는 인증된 사용자를 전제로 합니다.
//!
//! | 메서드 | 경로 | 권한 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/me` | 본인 | 200 |
//! | `PUT` | `/me` | 본인 | 200 |
//! | `PUT` | `/me/password` | 본인 | 204 |
//! | `GET` | `` | 관리자 | 200 |
//! | `GET` | `/{id}` | 본인 또는 관리자 | 200 |
//! | `DELETE` | `/{id}` | 관리자 (본인 제외) | 204 |
//!
//! `/me` 경로는 `/{id}`보다 먼저 등록되어야 합니다.

use actix_web::{delete, get, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::users::request::{UpdatePasswordRequest, UpdateUserRequest};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::users::UserService;

/// 사용자 목록 조회 권한
pub fn ensure_can_list(user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(
            "Apenas administradores podem listar usuários".to_string(),
        ))
    }
}

/// 다른 사용자의 프로필은 관리자만 볼 수 있습니다.
pub fn ensure_can_view(user: &AuthenticatedUser, target_id: &str) -> Result<(), AppError> {
    if user.is_admin() || user.is_self(target_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError(
            "Sem permissão para ver este perfil".to_string(),
        ))
    }
}

/// 관리자만 삭제할 수 있고, 자기 자신은 삭제할 수 없습니다.
pub fn ensure_can_delete(user: &AuthenticatedUser, target_id: &str) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::AuthorizationError(
            "Apenas administradores podem deletar usuários".to_string(),
        ));
    }
    if user.is_self(target_id) {
        return Err(AppError::AuthorizationError(
            "Você não pode deletar sua própria conta".to_string(),
        ));
    }
    Ok(())
}

#[get("/me")]
pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let found = UserService::instance().find_by_id(&user.id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}

#[put("/me")]
pub async fn update_me(
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = UserService::instance()
        .update(&user.id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[put("/me/password")]
pub async fn update_password(
    user: AuthenticatedUser,
    payload: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    UserService::instance()
        .update_password(&user.id, payload.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("")]
pub async fn list_users(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    ensure_can_list(&user)?;

    let users = UserService::instance().find_all().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}")]
pub async fn get_user(
    user: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ensure_can_view(&user, &user_id)?;

    let found = UserService::instance().find_by_id(&user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    user: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ensure_can_delete(&user, &user_id)?;

    UserService::instance().remove(&user_id).await?;
    log::info!("🗑️ 사용자 삭제: {} (관리자 {})", user_id, user.id);

    Ok(HttpResponse::NoContent().finish())
}
