//! JWT 토큰 관리 서비스 구현
//!
//! HS256으로 서명되는 두 종류의 토큰을 발급/검증합니다.
//!
//! | 토큰 | 클레임 | 수명 |
//! |------|--------|------|
//! | 액세스 토큰 | `{sub, email, iat, exp}` | `JWT_EXPIRATION_SECONDS` |
//! | Google 가입 임시 토큰 | `{googleUser, iat, exp}` | 600초 |

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Serialize};
use singleton_macro::service;

use crate::config::JwtConfig;
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::entities::users::User;
use crate::domain::models::oauth::GoogleProfile;
use crate::domain::models::token::{AccessClaims, TempClaims};

#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, AppError> {
        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), claims, &encoding_key).context("JWT 토큰 생성 실패")
    }

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        decode::<C>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token expirado".to_string())
                }
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError("Token inválido".to_string())
                }
            })
    }

    /// 사용자 액세스 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 저장되지 않은(ID 없는) 사용자이거나 서명 실패
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        let sub = user
            .id
            .map(|id| id.to_hex())
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let now = Utc::now();
        let claims = AccessClaims {
            sub,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(JwtConfig::expiration_seconds())).timestamp(),
        };

        self.sign(&claims)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.verify(token)
    }

    /// 도시 입력을 기다리는 Google 사용자의 프로필을 담은 임시 토큰
    pub fn generate_temp_token(&self, profile: &GoogleProfile) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = TempClaims {
            google_user: profile.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(JwtConfig::temp_expiration_seconds())).timestamp(),
        };

        self.sign(&claims)
    }

    pub fn verify_temp_token(&self, token: &str) -> Result<TempClaims, AppError> {
        self.verify(token)
    }

    /// `Authorization` 헤더 값에서 `Bearer ` 접두사를 제거한 토큰
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError("Formato de token inválido".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::dto::users::request::CreateUser;
    use crate::domain::entities::users::UserRole;
    use mongodb::bson::oid::ObjectId;

    fn service() -> TokenService {
        TokenService {}
    }

    fn saved_user() -> User {
        let mut user = CreateUser {
            name: "Ana".into(),
            email: "Ana@Example.com".into(),
            password: None,
            city: "Fortaleza".into(),
            role: UserRole::User,
            provider: AuthProvider::Local,
            google_id: None,
            picture: None,
        }
        .into_user(Some("hash".into()));
        user.id = Some(ObjectId::new());
        user
    }

    fn profile() -> GoogleProfile {
        GoogleProfile {
            google_id: "g-123".into(),
            email: "ana@gmail.com".into(),
            name: "Ana".into(),
            picture: None,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let user = saved_user();
        let token = service().generate_access_token(&user).unwrap();

        let claims = service().verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, user.id_string());
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.exp - claims.iat, JwtConfig::expiration_seconds());
    }

    #[test]
    fn test_unsaved_user_cannot_get_token() {
        let mut user = saved_user();
        user.id = None;

        assert!(matches!(
            service().generate_access_token(&user),
            Err(AppError::InternalError(_))
        ));
    }

    #[test]
    fn test_expired_token_has_distinct_message() {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: ObjectId::new().to_hex(),
            email: "old@example.com".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = service().sign(&claims).unwrap();

        match service().verify_access_token(&token) {
            Err(AppError::AuthenticationError(message)) => assert_eq!(message, "Token expirado"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_token_kinds_do_not_cross_verify() {
        let temp = service().generate_temp_token(&profile()).unwrap();
        let access = service().generate_access_token(&saved_user()).unwrap();

        assert!(service().verify_access_token(&temp).is_err());
        assert!(service().verify_temp_token(&access).is_err());
        assert_eq!(service().verify_temp_token(&temp).unwrap().google_user, profile());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let mut token = service().generate_access_token(&saved_user()).unwrap();
        token.push('x');

        assert!(matches!(
            service().verify_access_token(&token),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        let svc = service();
        assert_eq!(svc.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(svc.extract_bearer_token("Basic abc").is_err());
        assert!(svc.extract_bearer_token("Bearer ").is_err());
        assert!(svc.extract_bearer_token("abc").is_err());
    }
}
