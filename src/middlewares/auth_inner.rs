//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.id);
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    if err.status_code().is_client_error() {
                        log::warn!("인증 실패 {} {}: {}", req.method(), req.path(), err.message());
                    }
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Bearer 토큰을 검증하고 토큰 주인(`sub`)을 조회합니다.
///
/// 삭제된 사용자의 토큰은 401로 처리합니다. 조회 자체의 장애(DB 등)는 그대로 전파됩니다.
async fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Token não fornecido".to_string()))?;

    let token_service = TokenService::instance();
    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_access_token(token)?;

    let user = UserService::instance()
        .find_by_id(&claims.sub)
        .await
        .map_err(missing_user_as_unauthorized)?;

    Ok(AuthenticatedUser::from(&user))
}

/// 토큰의 `sub`가 더 이상 존재하지 않는 사용자를 가리키면 401로 바꿉니다.
/// DB 장애 같은 나머지 오류는 그대로 둡니다.
fn missing_user_as_unauthorized(err: AppError) -> AppError {
    match err {
        AppError::NotFound(_) | AppError::ValidationError(_) => {
            AppError::AuthenticationError("Usuário não encontrado".to_string())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_user_becomes_unauthorized() {
        let err = missing_user_as_unauthorized(AppError::NotFound("Usuário não encontrado".into()));
        assert!(matches!(err, AppError::AuthenticationError(_)));
        assert_eq!(err.status_code(), actix_web::http::StatusCode::UNAUTHORIZED);

        let err = missing_user_as_unauthorized(AppError::ValidationError("ID inválido".into()));
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[test]
    fn test_infrastructure_errors_pass_through() {
        let err = missing_user_as_unauthorized(AppError::DatabaseError("timeout".into()));
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
