//! 사용자 응답 DTO
//!
//! 비밀번호 해시와 재설정 토큰은 어떤 응답에도 포함되지 않습니다.
//! 날짜는 밀리초 단위 ISO-8601 UTC 문자열로 직렬화됩니다.

use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::{User, UserRole};
use crate::utils::date_utils::to_iso_string;

/// `/api/users/*`가 반환하는 공개 사용자 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let id = user.id_string();
        let User {
            name,
            email,
            city,
            role,
            provider,
            google_id,
            picture,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id,
            name,
            email,
            city,
            role,
            provider,
            google_id,
            picture,
            created_at: to_iso_string(created_at),
            updated_at: to_iso_string(updated_at),
        }
    }
}

/// 로그인/가입 응답에 실리는 요약 사용자 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub provider: AuthProvider,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            city: user.city.clone(),
            role: user.role,
            picture: user.picture.clone(),
            provider: user.provider,
        }
    }
}

/// `{access_token, user}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: AuthUser,
}

/// 단순 안내 메시지 응답 `{message}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::users::request::CreateUser;
    use mongodb::bson::oid::ObjectId;

    fn stored_user() -> User {
        let mut user = CreateUser {
            name: "Maria".into(),
            email: "maria@example.com".into(),
            password: None,
            city: "Recife".into(),
            role: UserRole::User,
            provider: AuthProvider::Local,
            google_id: None,
            picture: None,
        }
        .into_user(Some("$2b$04$secret-hash".into()));
        user.id = Some(ObjectId::new());
        user.reset_password_token = Some("digest".into());
        user
    }

    #[test]
    fn test_user_response_hides_secrets() {
        let user = stored_user();
        let id = user.id_string();

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["_id"], id);
        assert_eq!(json["role"], "user");
        assert_eq!(json["provider"], "local");
        assert!(json.get("password").is_none());
        assert!(json.get("resetPasswordToken").is_none());
        assert!(json["createdAt"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_auth_response_shape() {
        let user = stored_user();
        let response = AuthResponse {
            access_token: "jwt".into(),
            user: AuthUser::from(&user),
        };

        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["access_token"], "jwt");
        assert_eq!(json["user"]["id"], user.id_string());
        assert_eq!(json["user"]["city"], "Recife");
        assert!(json["user"].get("picture").is_none());
    }
}
