//! Google 로그인 결과 DTO

use serde::Serialize;

use super::user_response::AuthResponse;

/// 도시 입력이 필요한 신규 Google 사용자에게 보여줄 정보
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingGoogleUser {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Google 로그인 결과
///
/// 기존 사용자는 곧바로 `AuthResponse`를, 신규 사용자는
/// `{needsCity: true, tempToken, user}`를 받습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GoogleLoginResult {
    Authenticated(AuthResponse),
    #[serde(rename_all = "camelCase")]
    NeedsCity {
        needs_city: bool,
        temp_token: String,
        user: PendingGoogleUser,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_city_shape() {
        let result = GoogleLoginResult::NeedsCity {
            needs_city: true,
            temp_token: "tmp".into(),
            user: PendingGoogleUser {
                name: "Bia".into(),
                email: "bia@gmail.com".into(),
                picture: None,
            },
        };

        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["needsCity"], true);
        assert_eq!(json["tempToken"], "tmp");
        assert_eq!(json["user"]["email"], "bia@gmail.com");
    }
}
