//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 토큰을 검증하고, 토큰 주인을 조회해
//! [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를 extensions에 넣습니다.
//!
//! 토큰이 없거나 형식 오류/만료/위조이거나 토큰 주인이 삭제되었으면 401을 돌려줍니다.
//! 역할 검사는 라우트마다 거부 메시지가 달라 핸들러가 직접 합니다.
//!
//! 거부 응답은 `{"statusCode", "message", "error"}` 형식입니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::auth::AuthenticatedUser;
    use actix_web::{http::StatusCode, web, App, HttpResponse};
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.email)
    }

    #[actix_web::test]
    async fn test_required_without_header_is_401_json() {
        let app = init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = TestRequest::get().uri("/me").to_request();
        let res = call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["statusCode"], 401);
        assert_eq!(body["error"], "Unauthorized");
        assert_eq!(body["message"], "Token não fornecido");
    }

    #[actix_web::test]
    async fn test_required_with_non_bearer_or_forged_token_is_401() {
        let app = init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        for header in ["Basic dXNlcjpwYXNz", "Bearer not.a.jwt"] {
            let req = TestRequest::get()
                .uri("/me")
                .insert_header(("Authorization", header))
                .to_request();
            let res = call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "header: {}", header);
        }
    }
}
