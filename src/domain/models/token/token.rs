//! JWT 클레임 모델
//!
//! 두 종류의 토큰은 클레임 구조가 서로 겹치지 않으므로,
//! 한쪽 토큰을 다른 쪽 타입으로 디코딩하면 필수 필드 누락으로 실패합니다.

use serde::{Deserialize, Serialize};

use crate::domain::models::oauth::GoogleProfile;

/// 액세스 토큰 클레임 `{sub, email, iat, exp}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 사용자 ObjectId (hex)
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Google 가입 완료 전 발급되는 임시 토큰 클레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempClaims {
    #[serde(rename = "googleUser")]
    pub google_user: GoogleProfile,
    pub iat: i64,
    pub exp: i64,
}
