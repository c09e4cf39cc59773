//! 날씨 로그 요청 DTO
//!
//! `POST /api/weather/logs`는 Go 워커가 호출합니다. 워커는 빈 슬라이스를
//! `null`로 보낼 수 있으므로 `insights`/`pokemon_suggestions`의 `null`은 빈 배열로 취급합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::weather::{Location, PokemonData, PokemonSuggestion, WeatherData};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LocationInput {
    #[validate(length(min = 1, message = "A cidade é obrigatória"))]
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WeatherInput {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub condition: String,
    #[serde(default)]
    pub precipitation_mm: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PokemonSuggestionInput {
    #[validate(length(min = 1, message = "O nome do Pokémon é obrigatório"))]
    pub name: String,
    pub reasoning: String,
    #[serde(default)]
    pub pokemon_data: Option<PokemonData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateWeatherLogRequest {
    #[validate(length(min = 1, message = "external_id é obrigatório"))]
    pub external_id: String,

    #[validate(nested)]
    pub location: LocationInput,

    #[validate(nested)]
    pub weather: WeatherInput,

    #[serde(default)]
    pub insights: Option<Vec<String>>,

    #[serde(default)]
    #[validate(nested)]
    pub pokemon_suggestions: Option<Vec<PokemonSuggestionInput>>,

    /// RFC 3339 (`2025-12-03T10:00:00Z`) 또는 `YYYY-MM-DD`
    #[validate(length(min = 1, message = "timestamp é obrigatório"))]
    pub timestamp: String,
}

impl From<LocationInput> for Location {
    fn from(input: LocationInput) -> Self {
        Self {
            city: input.city,
            lat: input.lat,
            lon: input.lon,
        }
    }
}

impl From<WeatherInput> for WeatherData {
    fn from(input: WeatherInput) -> Self {
        Self {
            temperature: input.temperature,
            humidity: input.humidity,
            wind_speed: input.wind_speed,
            condition: input.condition,
            precipitation_mm: input.precipitation_mm,
        }
    }
}

impl From<PokemonSuggestionInput> for PokemonSuggestion {
    fn from(input: PokemonSuggestionInput) -> Self {
        Self {
            name: input.name,
            reasoning: input.reasoning,
            pokemon_data: input.pokemon_data,
        }
    }
}

/// `GET /api/weather/logs`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogsQuery {
    #[validate(range(min = 1, message = "page deve ser maior ou igual a 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, message = "limit deve ser maior ou igual a 1"))]
    pub limit: Option<u64>,
    pub city: Option<String>,
}

impl LogsQuery {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 20;

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

/// `GET /api/weather/stats`
#[derive(Debug, Clone, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// `GET /api/weather/export/{csv,xlsx}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub city: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// 빈 문자열 쿼리(`?city=`)는 필터 없음으로 취급합니다.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKER_PAYLOAD: &str = r#"{
        "external_id": "d4cfe3a0-e1c5-4db0-ba03-aad17828f34a",
        "location": { "city": "São Paulo", "lat": -23.55, "lon": -46.63 },
        "weather": { "temperature": 25, "humidity": 60, "wind_speed": 10, "condition": "céu limpo" },
        "timestamp": "2025-12-03T10:00:00.123456789-03:00",
        "insights": null,
        "pokemon_suggestions": [
            {
                "name": "charmander",
                "reasoning": "Tipo fire",
                "pokemon_data": {
                    "id": 4,
                    "types": ["fire"],
                    "abilities": ["blaze"],
                    "stats": { "hp": 39, "attack": 52 },
                    "sprites": { "front_default": "https://img/4.png" }
                }
            }
        ]
    }"#;

    #[test]
    fn test_worker_payload_parses_and_validates() {
        let request: CreateWeatherLogRequest = serde_json::from_str(WORKER_PAYLOAD).unwrap();

        assert!(request.validate().is_ok());
        assert!(request.insights.is_none());
        let suggestions = request.pokemon_suggestions.unwrap();
        assert_eq!(suggestions[0].pokemon_data.as_ref().unwrap().id, 4);
        assert_eq!(request.weather.temperature, 25.0);
    }

    #[test]
    fn test_nested_validation_fails_on_empty_city() {
        let mut request: CreateWeatherLogRequest = serde_json::from_str(WORKER_PAYLOAD).unwrap();
        request.location.city = String::new();

        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("location"));
    }

    #[test]
    fn test_numeric_readings_are_not_range_checked() {
        let mut request: CreateWeatherLogRequest = serde_json::from_str(WORKER_PAYLOAD).unwrap();
        request.location.lat = 120.0;
        request.location.lon = -200.0;
        request.weather.humidity = -1.0;
        request.weather.wind_speed = -3.5;

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unknown_suggestion_field_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(WORKER_PAYLOAD).unwrap();
        value["pokemon_suggestions"][0]["shiny"] = serde_json::json!(true);
        assert!(serde_json::from_value::<CreateWeatherLogRequest>(value).is_err());
    }

    #[test]
    fn test_unknown_top_level_field_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(WORKER_PAYLOAD).unwrap();
        value["hacker"] = serde_json::json!(true);
        assert!(serde_json::from_value::<CreateWeatherLogRequest>(value).is_err());
    }

    #[test]
    fn test_logs_query_defaults_and_bounds() {
        let query = LogsQuery { page: None, limit: None, city: None };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 20);
        assert!(query.validate().is_ok());

        let query = LogsQuery { page: Some(0), limit: Some(10), city: None };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  Recife ".into())), Some("Recife"));
        assert_eq!(non_blank(&Some("   ".into())), None);
        assert_eq!(non_blank(&None), None);
    }
}
