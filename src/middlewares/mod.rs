//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 HS256 검증
//! - 토큰 주인 조회 후 `AuthenticatedUser`를 request extension에 저장
//! - 토큰 주인이 삭제된 경우도 401
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new().service(
//!     web::scope("/api/users")
//!         .wrap(AuthMiddleware::required())
//!         .route("", web::get().to(list_users)),
//! );
//!
//! #[get("/profile", wrap = "AuthMiddleware::required()")]
//! async fn profile(user: AuthenticatedUser) { /* ... */ }
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
