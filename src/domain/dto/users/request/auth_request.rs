//! 인증 요청관련 DTO
//!
//! `/api/auth/*` 엔드포인트의 요청 본문과 OAuth 콜백 쿼리를 매핑합니다.
//! 화이트리스트에 없는 필드가 섞인 요청은 `deny_unknown_fields`로 거부합니다.
//! 클라이언트에 노출되는 검증 메시지는 프론트엔드 언어(포르투갈어)를 따릅니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "A senha é obrigatória"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    pub name: String,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub password: String,

    #[validate(length(min = 2, message = "A cidade deve ter no mínimo 2 caracteres"))]
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token é obrigatório"))]
    pub token: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub new_password: String,
}

/// Google 로그인 후 도시 정보를 입력해 가입을 완료하는 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CompleteGoogleRegistrationRequest {
    #[validate(length(min = 1, message = "Token temporário é obrigatório"))]
    pub temp_token: String,

    #[validate(length(min = 2, message = "A cidade deve ter no mínimo 2 caracteres"))]
    pub city: String,
}

/// Google이 `/api/auth/google/callback`으로 전달하는 쿼리
///
/// 사용자가 동의를 거부하면 `code` 대신 `error`가 옵니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let request = RegisterRequest {
            name: "Maria".into(),
            email: "maria@example.com".into(),
            password: "123456".into(),
            city: "Recife".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_short_fields() {
        let request = RegisterRequest {
            name: "M".into(),
            email: "not-an-email".into(),
            password: "123".into(),
            city: "R".into(),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("city"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let json = r#"{"email":"a@b.com","password":"x","role":"admin"}"#;
        assert!(serde_json::from_str::<LoginRequest>(json).is_err());
    }

    #[test]
    fn test_reset_password_uses_camel_case() {
        let json = r#"{"token":"abc","newPassword":"123456"}"#;
        let request: ResetPasswordRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.new_password, "123456");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reset_password_short_password_message() {
        let request = ResetPasswordRequest {
            token: "abc".into(),
            new_password: "123".into(),
        };
        let errors = request.validate().unwrap_err();
        let message = errors.field_errors()["new_password"][0].message.clone().unwrap();
        assert_eq!(message, "A senha deve ter no mínimo 6 caracteres");
    }

    #[test]
    fn test_complete_google_registration_parses_camel_case() {
        let json = r#"{"tempToken":"t","city":"Manaus"}"#;
        let request: CompleteGoogleRegistrationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.temp_token, "t");
        assert!(request.validate().is_ok());
    }
}
