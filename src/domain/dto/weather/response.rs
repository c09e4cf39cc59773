//! 날씨 로그 응답 DTO

use serde::Serialize;

use crate::domain::entities::weather::{Location, PokemonSuggestion, WeatherData, WeatherLog};
use crate::utils::date_utils::to_iso_string;

/// 저장된 날씨 로그 (`_id`는 hex 문자열, 날짜는 ISO-8601)
#[derive(Debug, Clone, Serialize)]
pub struct WeatherLogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub external_id: String,
    pub location: Location,
    pub weather: WeatherData,
    pub insights: Vec<String>,
    pub pokemon_suggestions: Vec<PokemonSuggestion>,
    pub timestamp: String,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<WeatherLog> for WeatherLogResponse {
    fn from(log: WeatherLog) -> Self {
        let id = log.id_string();
        Self {
            id,
            external_id: log.external_id,
            location: log.location,
            weather: log.weather,
            insights: log.insights,
            pokemon_suggestions: log.pokemon_suggestions,
            timestamp: to_iso_string(log.timestamp),
            created_at: log.created_at.map(to_iso_string),
            updated_at: log.updated_at.map(to_iso_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl PageMeta {
    /// `pages = ceil(total / limit)`, 데이터가 없으면 0
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginatedLogs {
    pub data: Vec<WeatherLogResponse>,
    pub meta: PageMeta,
}
