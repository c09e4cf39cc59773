//! # 사용자 생성 명령
//!
//! 로컬 가입, Google 가입 완료, 기본 관리자 생성이 공통으로 사용하는
//! 서비스 계층 입력입니다. HTTP 요청 본문이 아니므로 검증은 호출 측 DTO에서 끝난 상태입니다.

use mongodb::bson::DateTime;

use crate::config::AuthProvider;
use crate::domain::entities::users::{User, UserRole};

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// 평문 비밀번호. `UserService::create`에서 해시됩니다.
    pub password: Option<String>,
    pub city: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub google_id: Option<String>,
    pub picture: Option<String>,
}

impl From<super::RegisterRequest> for CreateUser {
    fn from(request: super::RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: Some(request.password),
            city: request.city,
            role: UserRole::User,
            provider: AuthProvider::Local,
            google_id: None,
            picture: None,
        }
    }
}

impl CreateUser {
    /// 저장 전 사용자 문서를 만듭니다. 이메일은 소문자로 정규화됩니다.
    ///
    /// `password_hash`는 이미 bcrypt로 해시된 값이어야 하며, 평문 `password`는 버려집니다.
    pub fn into_user(self, password_hash: Option<String>) -> User {
        let now = DateTime::now();

        User {
            id: None,
            name: self.name,
            email: self.email.trim().to_lowercase(),
            password: password_hash,
            city: self.city,
            role: self.role,
            provider: self.provider,
            google_id: self.google_id,
            picture: self.picture,
            reset_password_token: None,
            reset_password_expires: None,
            created_at: now,
            updated_at: now,
        }
    }
}
