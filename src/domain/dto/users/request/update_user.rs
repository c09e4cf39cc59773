//! 사용자 정보 수정 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `PUT /api/users/me`
///
/// 모든 필드는 선택이며, 전달된 필드만 갱신됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub name: Option<String>,

    #[validate(length(min = 2, message = "A cidade deve ter no mínimo 2 caracteres"))]
    pub city: Option<String>,

    pub picture: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.city.is_none() && self.picture.is_none()
    }
}

/// `PUT /api/users/me/password`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "A senha atual é obrigatória"))]
    pub current_password: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_skip_validation_when_absent() {
        let request = UpdateUserRequest {
            picture: Some("https://example.com/p.png".into()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert!(!request.is_empty());
        assert!(UpdateUserRequest::default().is_empty());
    }

    #[test]
    fn test_short_city_is_rejected() {
        let request = UpdateUserRequest {
            city: Some("X".into()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_password_camel_case() {
        let json = r#"{"currentPassword":"old123","newPassword":"new1"}"#;
        let request: UpdatePasswordRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }
}
