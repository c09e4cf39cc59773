//! 사용자 리포지토리
//!
//! 이메일/ID/Google ID 조회는 Redis에 10분간 캐시하며, 사용자 문서가 바뀌는 모든 경로
//! (수정, 비밀번호 변경/재설정, 삭제)에서 관련 캐시 키를 모두 무효화합니다.
//! 캐시 장애는 조회를 실패시키지 않고 MongoDB로 폴백합니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime, Document, doc};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::users::User;
use crate::repositories::{db_error, is_duplicate_key, parse_object_id};

const CACHE_TTL_SECONDS: u64 = 600;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

fn id_suffix(object_id: &ObjectId) -> String {
    object_id.to_hex()
}

fn email_suffix(email: &str) -> String {
    format!("email:{}", email.trim().to_lowercase())
}

fn google_suffix(google_id: &str) -> String {
    format!("google:{}", google_id)
}

/// 사용자 문서 하나가 채울 수 있는 모든 캐시 키 접미사
fn cache_suffixes(user: &User) -> Vec<String> {
    let mut suffixes = vec![email_suffix(&user.email)];
    if let Some(ref id) = user.id {
        suffixes.push(id_suffix(id));
    }
    if let Some(ref google_id) = user.google_id {
        suffixes.push(google_suffix(google_id));
    }
    suffixes
}

impl UserRepository {
    async fn cache_user(&self, key: &str, user: &User) {
        if let Err(e) = self.redis.set_with_expiry(key, user, CACHE_TTL_SECONDS).await {
            log::warn!("⚠️ 사용자 캐시 저장 실패 ({}): {}", key, e);
        }
    }

    async fn evict(&self, user: &User) {
        let keys: Vec<String> = cache_suffixes(user)
            .iter()
            .map(|suffix| self.cache_key(suffix))
            .collect();
        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("⚠️ 사용자 캐시 무효화 실패: {}", e);
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.trim().to_lowercase();
        let cache_key = self.cache_key(&email_suffix(&email));

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection::<User>()
            .find_one(doc! { "email": &email })
            .await
            .map_err(db_error)?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = parse_object_id(id)?;
        let cache_key = self.cache_key(&id_suffix(&object_id));

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(db_error)?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AppError> {
        let cache_key = self.cache_key(&google_suffix(google_id));

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection::<User>()
            .find_one(doc! { "googleId": google_id })
            .await
            .map_err(db_error)?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    /// 해시된 재설정 토큰이 일치하고 아직 만료되지 않은 사용자
    pub async fn find_by_reset_token(&self, token_digest: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! {
                "resetPasswordToken": token_digest,
                "resetPasswordExpires": { "$gt": DateTime::now() },
            })
            .await
            .map_err(db_error)
    }

    /// 최근 가입 순
    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.collection::<User>()
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("Email já cadastrado".to_string())
                } else {
                    db_error(e)
                }
            })?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError("insert_one이 ObjectId를 반환하지 않았습니다".to_string()))?;
        user.id = Some(id);

        Ok(user)
    }

    /// `$set`(및 선택적 `$unset`)을 적용하고 갱신된 문서를 반환합니다.
    ///
    /// `updatedAt`은 항상 현재 시각으로 갱신됩니다.
    pub async fn update(
        &self,
        id: &str,
        mut set: Document,
        unset: Option<Document>,
    ) -> Result<Option<User>, AppError> {
        let object_id = parse_object_id(id)?;
        set.insert("updatedAt", DateTime::now());

        let mut update = doc! { "$set": set };
        if let Some(unset) = unset {
            update.insert("$unset", unset);
        }

        let updated = self
            .collection::<User>()
            .find_one_and_update(doc! { "_id": object_id }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)?;

        if let Some(ref user) = updated {
            self.evict(user).await;
        }

        Ok(updated)
    }

    /// 삭제된 경우 `true`
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = parse_object_id(id)?;

        let deleted = self
            .collection::<User>()
            .find_one_and_delete(doc! { "_id": object_id })
            .await
            .map_err(db_error)?;

        match deleted {
            Some(user) => {
                self.evict(&user).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let google_id_index = IndexModel::builder()
            .keys(doc! { "googleId": 1 })
            .options(
                IndexOptions::builder()
                    .sparse(true)
                    .name("google_id".to_string())
                    .build(),
            )
            .build();

        self.collection::<User>()
            .create_indexes([email_index, google_id_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::entities::users::UserRole;

    const HEX_ID: &str = "64b7f0c2a1b2c3d4e5f60718";

    fn stored_user() -> User {
        let now = DateTime::now();
        User {
            id: Some(ObjectId::parse_str(HEX_ID).unwrap()),
            name: "Lia".into(),
            email: "lia@gmail.com".into(),
            password: None,
            city: "Natal".into(),
            role: UserRole::User,
            provider: AuthProvider::Google,
            google_id: Some("g-77".into()),
            picture: None,
            reset_password_token: None,
            reset_password_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_eviction_covers_every_lookup_key() {
        let user = stored_user();
        let evicted = cache_suffixes(&user);

        let by_id = id_suffix(&parse_object_id(HEX_ID).unwrap());
        let by_email = email_suffix("lia@gmail.com");
        let by_google = google_suffix("g-77");

        for lookup in [by_id, by_email, by_google] {
            assert!(evicted.contains(&lookup), "missing {}", lookup);
        }
    }

    #[test]
    fn test_uppercase_id_maps_to_evicted_key() {
        let user = stored_user();
        let upper = parse_object_id(&HEX_ID.to_uppercase()).unwrap();

        assert!(cache_suffixes(&user).contains(&id_suffix(&upper)));
    }

    #[test]
    fn test_email_key_ignores_case_and_whitespace() {
        assert_eq!(email_suffix("  Lia@Gmail.COM "), email_suffix("lia@gmail.com"));
    }

    #[test]
    fn test_local_user_without_google_id() {
        let mut user = stored_user();
        user.google_id = None;
        user.id = None;

        assert_eq!(cache_suffixes(&user), vec![email_suffix("lia@gmail.com")]);
    }
}
