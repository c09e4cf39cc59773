//! # Weather Log Entity
//!
//! `weatherlogs` 컬렉션에 저장되는 날씨 로그 문서입니다.
//! 수집기(Collector) → 워커(Worker) 파이프라인이 만든 측정값에
//! AI 인사이트와 날씨에 어울리는 포켓몬 추천이 함께 담깁니다.
//!
//! `external_id`는 워커가 부여하는 고유 ID로, 같은 로그가 두 번 저장되지 않도록
//! 유니크 인덱스가 걸려 있습니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// km/h
    pub wind_speed: f64,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_mm: Option<f64>,
}

/// PokéAPI에서 가져온 포켓몬 상세 정보
///
/// `stats`와 `sprites`는 PokéAPI 응답 구조를 그대로 보관합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonData {
    pub id: i64,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub stats: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub sprites: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSuggestion {
    pub name: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokemon_data: Option<PokemonData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub external_id: String,
    pub location: Location,
    pub weather: WeatherData,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub pokemon_suggestions: Vec<PokemonSuggestion>,
    pub timestamp: DateTime,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl WeatherLog {
    pub fn id_string(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    /// 추천 포켓몬 이름 목록
    pub fn pokemon_names(&self) -> Vec<&str> {
        self.pokemon_suggestions.iter().map(|p| p.name.as_str()).collect()
    }
}

/// `$group` 집계 결과
///
/// 집계 문서의 `_id: null` 필드는 무시합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherStats {
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub avg_humidity: f64,
    pub count: i64,
}
