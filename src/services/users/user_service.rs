//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생명주기(가입, 조회, 수정, 비밀번호 변경/재설정, 삭제)를 담당합니다.
//!
//! ```text
//! AuthService / handlers
//!         │
//!         ▼
//! ┌──────────────────────────────┐      ┌─────────────────────┐
//! │          UserService         │ ───▶ │  CollectorService   │ (도시 변경 시, 비동기)
//! │ • bcrypt 해싱/검증           │      └─────────────────────┘
//! │ • 재설정 토큰 (SHA-256 저장) │
//! │ • Entity → UserResponse      │
//! └──────────────────────────────┘
//!         │
//!         ▼
//!   UserRepository (MongoDB + Redis 캐시)
//! ```
//!
//! ## 보안
//!
//! - 비밀번호는 환경별 cost의 bcrypt 해시로만 저장합니다.
//! - 재설정 토큰은 원문을 메일로만 보내고 DB에는 SHA-256 다이제스트만 남깁니다.
//! - 응답은 항상 [`UserResponse`]로 변환되어 해시/토큰이 노출되지 않습니다.

use std::sync::Arc;

use bcrypt::hash;
use mongodb::bson::{doc, DateTime, Document};
use sha2::{Digest, Sha256};
use singleton_macro::service;
use uuid::Uuid;

use crate::config::{AdminConfig, AuthProvider, PasswordConfig, PasswordResetConfig};
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::dto::users::request::{CreateUser, UpdatePasswordRequest, UpdateUserRequest};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::users::{User, UserRole};
use crate::repositories::users::UserRepository;
use crate::services::collector::CollectorService;

/// 32바이트 난수(UUIDv4 두 개)를 hex 문자열로
pub fn generate_reset_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// 재설정 토큰의 저장용 SHA-256 hex 다이제스트
pub fn hash_reset_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// 전달된 필드만 담은 `$set` 문서
fn update_document(request: &UpdateUserRequest) -> Document {
    let mut set = Document::new();
    if let Some(ref name) = request.name {
        set.insert("name", name);
    }
    if let Some(ref city) = request.city {
        set.insert("city", city);
    }
    if let Some(ref picture) = request.picture {
        set.insert("picture", picture);
    }
    set
}

fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, PasswordConfig::bcrypt_cost()).context("비밀번호 해싱 실패")
}

fn user_not_found() -> AppError {
    AppError::NotFound("Usuário não encontrado".to_string())
}

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    collector: Arc<CollectorService>,
}

impl UserService {
    /// 사용자 생성
    ///
    /// 이메일은 소문자로 저장되며, 비밀번호가 있으면 bcrypt로 해시합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 가입된 이메일
    pub async fn create(&self, request: CreateUser) -> Result<User, AppError> {
        let email = request.email.trim().to_lowercase();

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("Email já cadastrado".to_string()));
        }

        let password = match request.password {
            Some(ref plain) => {
                let hash_start = std::time::Instant::now();
                let hashed = hash_password(plain)?;
                log::debug!("Password hashing took: {:?}", hash_start.elapsed());
                Some(hashed)
            }
            None => None,
        };

        let user = request.into_user(password);

        let created = self.user_repo.create(user).await?;
        log::info!("👤 사용자 생성: {} ({})", created.email, created.provider);

        Ok(created)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_email(email).await
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_google_id(google_id).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<User, AppError> {
        self.user_repo.find_by_id(id).await?.ok_or_else(user_not_found)
    }

    pub async fn find_all(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 프로필 수정
    ///
    /// 도시가 바뀌면 새 도시를 수집기에 비동기로 알립니다.
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<UserResponse, AppError> {
        let current = self.find_by_id(id).await?;

        if request.is_empty() {
            return Ok(UserResponse::from(current));
        }

        let updated = self
            .user_repo
            .update(id, update_document(&request), None)
            .await?
            .ok_or_else(user_not_found)?;

        if updated.city != current.city {
            log::info!("🏙️ 도시 변경: {} → {} ({})", current.city, updated.city, updated.email);
            self.collector.spawn_collection(updated.city.clone());
        }

        Ok(UserResponse::from(updated))
    }

    /// 현재 비밀번호 확인 후 새 비밀번호로 변경
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - OAuth 계정이거나 현재 비밀번호 불일치
    pub async fn update_password(&self, id: &str, request: UpdatePasswordRequest) -> Result<(), AppError> {
        let user = self.find_by_id(id).await?;

        if user.password.is_none() {
            return Err(AppError::ValidationError(
                "Usuários OAuth não podem trocar senha".to_string(),
            ));
        }

        if !self.validate_password(&user, &request.current_password) {
            return Err(AppError::ValidationError("Senha atual incorreta".to_string()));
        }

        let password = hash_password(&request.new_password)?;
        self.user_repo
            .update(id, doc! { "password": password }, None)
            .await?
            .ok_or_else(user_not_found)?;

        log::info!("🔑 비밀번호 변경: {}", user.email);
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        if !self.user_repo.delete(id).await? {
            return Err(user_not_found());
        }

        log::info!("🗑️ 사용자 삭제: {}", id);
        Ok(())
    }

    /// 비밀번호 일치 여부. 비밀번호가 없는(OAuth) 사용자는 항상 `false`.
    pub fn validate_password(&self, user: &User, password: &str) -> bool {
        let Some(ref password_hash) = user.password else {
            return false;
        };

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(password, password_hash).unwrap_or_else(|e| {
            log::warn!("비밀번호 검증 실패 ({}): {}", user.email, e);
            false
        });
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        is_valid
    }

    /// 재설정 토큰을 발급하고 (원문 토큰, 사용자)를 반환합니다.
    pub async fn set_reset_password_token(&self, email: &str) -> Result<(String, User), AppError> {
        let user = self.user_repo.find_by_email(email).await?.ok_or_else(user_not_found)?;

        let token = generate_reset_token();
        let expires = DateTime::from_millis(
            DateTime::now().timestamp_millis() + PasswordResetConfig::ttl_seconds() * 1000,
        );

        let updated = self
            .user_repo
            .update(
                &user.id_string(),
                doc! {
                    "resetPasswordToken": hash_reset_token(&token),
                    "resetPasswordExpires": expires,
                },
                None,
            )
            .await?
            .ok_or_else(user_not_found)?;

        Ok((token, updated))
    }

    /// 유효한 재설정 토큰으로 비밀번호를 바꾸고 토큰 필드를 제거합니다.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let invalid = || AppError::ValidationError("Token inválido ou expirado".to_string());

        let user = self
            .user_repo
            .find_by_reset_token(&hash_reset_token(token))
            .await?
            .ok_or_else(invalid)?;

        let password = hash_password(new_password)?;
        self.user_repo
            .update(
                &user.id_string(),
                doc! { "password": password },
                Some(doc! { "resetPasswordToken": "", "resetPasswordExpires": "" }),
            )
            .await?
            .ok_or_else(invalid)?;

        log::info!("🔑 비밀번호 재설정 완료: {}", user.email);
        Ok(())
    }

    /// 기본 관리자 계정이 없으면 생성합니다. (기동 시 1회)
    pub async fn ensure_default_admin(&self) -> Result<(), AppError> {
        let email = AdminConfig::email();

        if self.user_repo.find_by_email(&email).await?.is_some() {
            log::info!("👑 관리자 계정 확인: {}", email);
            return Ok(());
        }

        self.create(CreateUser {
            name: "Admin".to_string(),
            email: email.clone(),
            password: Some(AdminConfig::password()),
            city: AdminConfig::city(),
            role: UserRole::Admin,
            provider: AuthProvider::Local,
            google_id: None,
            picture: None,
        })
        .await?;

        log::info!("👑 기본 관리자 계정 생성: {}", email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_token_shape() {
        let token = generate_reset_token();

        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_reset_token());
    }

    #[test]
    fn test_hash_reset_token_is_stable_sha256() {
        assert_eq!(
            hash_reset_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(hash_reset_token("abc"), hash_reset_token("abd"));
    }

    #[test]
    fn test_update_document_contains_only_given_fields() {
        let request = UpdateUserRequest {
            city: Some("Curitiba".into()),
            ..Default::default()
        };

        let set = update_document(&request);

        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("city").unwrap(), "Curitiba");
    }

    #[test]
    fn test_hashed_password_verifies() {
        let hashed = hash_password("segredo1").unwrap();

        assert!(bcrypt::verify("segredo1", &hashed).unwrap());
        assert!(!bcrypt::verify("outra", &hashed).unwrap());
    }
}
