//! # Repository Layer
//!
//! MongoDB 컬렉션 접근을 담당하는 계층입니다. 각 리포지토리는 `#[repository]`
//! 매크로로 선언되어 `db`(필요 시 `redis`) 필드를 자동 주입받습니다.
//!
//! | 리포지토리 | 컬렉션 | 캐시 |
//! |------------|--------|------|
//! | [`UserRepository`](users::UserRepository) | `users` | 이메일/ID 조회 (600초) |
//! | [`WeatherLogRepository`](weather::WeatherLogRepository) | `weatherlogs` | 없음 |

use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};

use crate::core::errors::AppError;

pub mod users;
pub mod weather;

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY: i32 = 11000;

/// 유니크 인덱스 위반(`E11000`) 여부
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// 경로 파라미터의 hex 문자열을 `ObjectId`로 변환합니다. 형식이 틀리면 400.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::ValidationError(format!("ID inválido: {}", id)))
}

pub(crate) fn db_error(error: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(error.to_string())
}
