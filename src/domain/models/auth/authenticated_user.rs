//! # 인증된 사용자 모델
//!
//! `AuthMiddleware`가 JWT를 검증하고 사용자 문서를 조회한 뒤
//! 요청 extensions에 넣어 두는 값입니다. 핸들러에서는 추출자로 바로 받습니다.
//!
//! ```rust,ignore
//! #[get("/me", wrap = "AuthMiddleware::required()")]
//! async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     Ok(HttpResponse::Ok().json(user))
//! }
//! ```

use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::domain::entities::users::{User, UserRole};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub city: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 요청 대상 사용자 ID가 자기 자신인지 여부
    pub fn is_self(&self, user_id: &str) -> bool {
        self.id == user_id
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            city: user.city.clone(),
            role: user.role,
            provider: user.provider,
            picture: user.picture.clone(),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Token não fornecido".to_string(),
            )
            .into())),
        }
    }
}
