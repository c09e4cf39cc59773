//! # Application Error Handling System
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! Spring Framework의 `@ExceptionHandler`와 글로벌 에러 처리 메커니즘을
//! Rust의 타입 시스템과 결합하여 일관된 에러 응답을 제공합니다.
//!
//! ## 응답 형식
//!
//! 모든 에러는 프론트엔드가 기대하는 동일한 JSON 형식으로 변환됩니다.
//! 프론트엔드는 `message` 필드를 사용자에게 그대로 보여줍니다.
//!
//! ```json
//! {
//!   "statusCode": 401,
//!   "message": "Credenciais inválidas",
//!   "error": "Unauthorized"
//! }
//! ```
//!
//! 5xx 에러의 상세 내용은 서버 로그에만 남기고, 클라이언트에는
//! 일반 메시지만 전달합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패, 잘못된 토큰/ID |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 중복 이메일, 중복 날씨 로그 |
//! | `AuthenticationError` | 401 Unauthorized | 인증 실패 |
//! | `AuthorizationError` | 403 Forbidden | 권한 부족 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | 캐시 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | Google, SMTP 등 외부 호출 실패 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error`를 구현하고, `actix_web::ResponseError`를 구현하여
/// 핸들러에서 `?`로 전파하면 곧바로 HTTP 응답으로 변환됩니다.
///
/// ```rust,ignore
/// let user = user_repo.find_by_id(&id).await?
///     .ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스(MongoDB) 연산 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 연산 실패
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 실패 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 중복 데이터 생성 시도 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    ///
    /// 잘못된 로그인 정보, 만료되거나 위조된 JWT, 유효하지 않은 OAuth state 등.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 호출 실패
    ///
    /// Google OAuth 토큰 교환, SMTP 발송 등.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 예상하지 못한 시스템 오류
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 변형에 담긴 상세 메시지를 반환합니다.
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(msg)
            | AppError::RedisError(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::ExternalServiceError(msg)
            | AppError::InternalError(msg) => msg,
        }
    }

    /// 표준 에러 본문을 생성합니다.
    ///
    /// 미들웨어처럼 `AppError`를 거치지 않고 직접 응답을 만드는 곳에서도
    /// 같은 형식을 쓰기 위해 공개되어 있습니다.
    pub fn body(status: StatusCode, message: &str) -> serde_json::Value {
        serde_json::json!({
            "statusCode": status.as_u16(),
            "message": message,
            "error": status.canonical_reason().unwrap_or("Error"),
        })
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() {
            log::error!("❌ {}", self);
            "Internal server error"
        } else {
            self.message()
        };

        HttpResponse::build(status).json(Self::body(status, message))
    }
}

/// `validator` 검증 실패를 400 응답으로 변환합니다.
///
/// DTO에 지정한 `message`가 있으면 그 메시지를, 없으면 `필드: 코드` 형식을 사용하며
/// 여러 개는 `; `로 이어 붙입니다. 중첩 구조체의 오류는 경로를 점으로 연결합니다.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_validation_messages("", &errors, &mut messages);
        messages.sort();
        AppError::ValidationError(messages.join("; "))
    }
}

fn collect_validation_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    match &error.message {
                        Some(message) => out.push(message.to_string()),
                        None => out.push(format!("{}: {}", path, error.code)),
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(&path, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 `AppError::InternalError`로 변환하는 확장 trait
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let bytes = workbook.save_to_buffer().context("XLSX 생성 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use validator::Validate;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email inválido".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Usuário não encontrado".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Email já cadastrado".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Credenciais inválidas".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Sem permissão".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_infrastructure_errors_are_500() {
        for error in [
            AppError::DatabaseError("x".into()),
            AppError::RedisError("x".into()),
            AppError::ExternalServiceError("x".into()),
            AppError::InternalError("x".into()),
        ] {
            assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let response = AppError::AuthenticationError("Credenciais inválidas".into()).error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["statusCode"], 401);
        assert_eq!(body["message"], "Credenciais inválidas");
        assert_eq!(body["error"], "Unauthorized");
    }

    #[actix_web::test]
    async fn test_server_error_hides_details() {
        let response = AppError::DatabaseError("connection refused at 10.0.0.3".into()).error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["message"], "Internal server error");
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(email(message = "Email inválido"))]
        email: String,
        #[validate(length(min = 6))]
        password: String,
    }

    #[test]
    fn test_validation_errors_conversion() {
        let sample = Sample {
            email: "nope".to_string(),
            password: "123".to_string(),
        };
        let error: AppError = sample.validate().unwrap_err().into();

        match error {
            AppError::ValidationError(msg) => {
                assert!(msg.contains("Email inválido"));
                assert!(msg.contains("password: length"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }
}
