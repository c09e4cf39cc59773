//! # User Entity
//!
//! `users` 컬렉션에 저장되는 사용자 문서입니다.
//! 필드 이름은 프론트엔드와 공유하는 camelCase(`googleId`, `createdAt` 등)로 저장됩니다.
//!
//! ## 인증 방식별 필드
//!
//! | 필드 | 로컬 사용자 | Google 사용자 |
//! |------|-------------|---------------|
//! | `password` | bcrypt 해시 | 없음 |
//! | `provider` | `local` | `google` |
//! | `googleId` | 없음 | Google 계정 ID |
//! | `picture` | 선택 | Google 프로필 이미지 |
//!
//! 비밀번호 재설정 중에는 `resetPasswordToken`(토큰의 SHA-256 해시)과
//! `resetPasswordExpires`가 설정되며, 재설정이 완료되면 제거됩니다.
//!
//! 이 엔티티는 클라이언트 응답에 직접 쓰지 않습니다.
//! 응답에는 민감 필드를 제외한 [`UserResponse`](crate::domain::dto::users::response::UserResponse)를 사용하세요.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub city: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub provider: AuthProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_password_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_password_expires: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    pub fn id_string(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    /// 로컬 로그인(이메일/비밀번호)이 가능한 계정인지 여부
    pub fn can_authenticate_with_password(&self) -> bool {
        self.provider == AuthProvider::Local && self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn google_user() -> User {
        let now = DateTime::now();
        User {
            id: None,
            name: "Ana".into(),
            email: "ana@gmail.com".into(),
            password: None,
            city: "Natal".into(),
            role: UserRole::User,
            provider: AuthProvider::Google,
            google_id: Some("g-1".into()),
            picture: Some("https://example.com/a.png".into()),
            reset_password_token: None,
            reset_password_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_login_requires_local_provider() {
        let mut user = google_user();
        assert!(!user.can_authenticate_with_password());

        user.provider = AuthProvider::Local;
        user.password = Some("$2b$04$hash".into());
        assert!(user.can_authenticate_with_password());
    }

    #[test]
    fn test_bson_field_names_are_camel_case() {
        let mut user = google_user();
        user.reset_password_expires = Some(DateTime::now());

        let doc = bson::to_document(&user).unwrap();

        assert!(doc.contains_key("googleId"));
        assert!(doc.contains_key("resetPasswordExpires"));
        assert!(doc.contains_key("createdAt"));
        assert!(!doc.contains_key("password"));
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("provider").unwrap(), "google");
        assert_eq!(doc.get_str("role").unwrap(), "user");
    }

    #[test]
    fn test_missing_role_and_provider_use_defaults() {
        let doc = bson::doc! {
            "name": "Legacy",
            "email": "legacy@example.com",
            "city": "Belém",
            "createdAt": DateTime::now(),
            "updatedAt": DateTime::now(),
        };

        let user: User = bson::from_document(doc).unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.provider, AuthProvider::Local);
    }
}
