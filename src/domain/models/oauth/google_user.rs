//! Google OAuth 2.0 응답 모델

use serde::{Deserialize, Serialize};

/// 토큰 엔드포인트(`GOOGLE_TOKEN_URI`) 응답
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// userinfo 엔드포인트(`/oauth2/v2/userinfo`) 응답
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub verified_email: Option<bool>,
}

/// 애플리케이션이 사용하는 Google 사용자 프로필
///
/// 도시 입력 전까지 임시 토큰의 `googleUser` 클레임에 그대로 실립니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProfile {
    pub google_id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl From<GoogleUserInfo> for GoogleProfile {
    fn from(info: GoogleUserInfo) -> Self {
        let name = info
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| info.email.split('@').next().unwrap_or_default().to_string());

        Self {
            google_id: info.id,
            email: info.email.to_lowercase(),
            name,
            picture: info.picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_userinfo() {
        let info: GoogleUserInfo = serde_json::from_str(
            r#"{"id":"1089","email":"Bia@Gmail.com","verified_email":true,"name":"Bia","picture":"https://lh3/p.jpg"}"#,
        )
        .unwrap();

        let profile = GoogleProfile::from(info);
        assert_eq!(profile.google_id, "1089");
        assert_eq!(profile.email, "bia@gmail.com");
        assert_eq!(profile.picture.as_deref(), Some("https://lh3/p.jpg"));
    }

    #[test]
    fn test_profile_name_falls_back_to_email_local_part() {
        let info: GoogleUserInfo = serde_json::from_str(r#"{"id":"1","email":"carlos@gmail.com"}"#).unwrap();
        assert_eq!(GoogleProfile::from(info).name, "carlos");
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = GoogleProfile {
            google_id: "1".into(),
            email: "a@b.com".into(),
            name: "A".into(),
            picture: None,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["googleId"], "1");
        assert!(json.get("picture").is_none());
    }
}
