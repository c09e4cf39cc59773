//! 날씨 로그 서비스

use std::sync::Arc;

use singleton_macro::service;

use crate::core::errors::AppError;
use crate::domain::dto::weather::request::{CreateWeatherLogRequest, LogsQuery, non_blank};
use crate::domain::dto::weather::response::{PageMeta, PaginatedLogs, WeatherLogResponse};
use crate::domain::entities::weather::{WeatherLog, WeatherStats};
use crate::repositories::weather::{LogFilter, WeatherLogRepository};
use crate::utils::date_utils::{parse_datetime, to_bson};

/// 요청 DTO를 저장할 엔티티로 변환합니다. `timestamp` 형식이 틀리면 400.
pub fn build_log(request: CreateWeatherLogRequest) -> Result<WeatherLog, AppError> {
    let timestamp = to_bson(parse_datetime(&request.timestamp)?);

    Ok(WeatherLog {
        id: None,
        external_id: request.external_id,
        location: request.location.into(),
        weather: request.weather.into(),
        insights: request.insights.unwrap_or_default(),
        pokemon_suggestions: request
            .pokemon_suggestions
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect(),
        timestamp,
        created_at: None,
        updated_at: None,
    })
}

#[service(name = "weather")]
pub struct WeatherService {
    weather_repo: Arc<WeatherLogRepository>,
}

impl WeatherService {
    /// 워커가 보낸 로그 저장
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 `timestamp`
    /// * `AppError::ConflictError` - 이미 저장된 `external_id`
    pub async fn create(&self, request: CreateWeatherLogRequest) -> Result<WeatherLogResponse, AppError> {
        let log = build_log(request)?;
        let saved = self.weather_repo.insert(log).await?;

        log::info!("🌦️ 날씨 로그 저장: {} ({})", saved.external_id, saved.location.city);
        Ok(WeatherLogResponse::from(saved))
    }

    /// 최신순 페이지 조회
    pub async fn find_all(&self, query: &LogsQuery) -> Result<PaginatedLogs, AppError> {
        let page = query.page();
        let limit = query.limit();
        if page == 0 || limit == 0 {
            return Err(AppError::ValidationError(
                "page e limit devem ser maiores ou iguais a 1".to_string(),
            ));
        }

        let filter = LogFilter::by_city(non_blank(&query.city));
        let skip = (page - 1).saturating_mul(limit);

        let logs = self.weather_repo.find_page(&filter, skip, limit).await?;
        let total = self.weather_repo.count(&filter).await?;

        Ok(PaginatedLogs {
            data: logs.into_iter().map(WeatherLogResponse::from).collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }

    pub async fn find_one(&self, id: &str) -> Result<WeatherLogResponse, AppError> {
        self.weather_repo
            .find_by_id(id)
            .await?
            .map(WeatherLogResponse::from)
            .ok_or_else(|| AppError::NotFound("Log não encontrado".to_string()))
    }

    /// 일치하는 로그가 없으면 `None` (JSON `null`)
    pub async fn get_stats(&self, city: Option<&str>) -> Result<Option<WeatherStats>, AppError> {
        self.weather_repo.stats(&LogFilter::by_city(city)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::weather::request::{LocationInput, PokemonSuggestionInput, WeatherInput};

    fn request(timestamp: &str) -> CreateWeatherLogRequest {
        CreateWeatherLogRequest {
            external_id: "ext-42".into(),
            location: LocationInput {
                city: "Salvador".into(),
                lat: -12.97,
                lon: -38.5,
            },
            weather: WeatherInput {
                temperature: 30.0,
                humidity: 70.0,
                wind_speed: 14.0,
                condition: "ensolarado".into(),
                precipitation_mm: None,
            },
            insights: None,
            pokemon_suggestions: Some(vec![PokemonSuggestionInput {
                name: "vulpix".into(),
                reasoning: "Calor".into(),
                pokemon_data: None,
            }]),
            timestamp: timestamp.into(),
        }
    }

    #[test]
    fn test_build_log_parses_timestamp_and_defaults() {
        let log = build_log(request("2025-12-03T10:00:00Z")).unwrap();

        assert_eq!(log.timestamp.timestamp_millis(), 1_764_756_000_000);
        assert!(log.insights.is_empty());
        assert_eq!(log.pokemon_names(), vec!["vulpix"]);
        assert_eq!(log.location.city, "Salvador");
        assert!(log.id.is_none());
    }

    #[test]
    fn test_build_log_accepts_plain_date() {
        let log = build_log(request("2025-12-03")).unwrap();
        assert_eq!(log.timestamp.timestamp_millis(), 1_764_720_000_000);
    }

    #[test]
    fn test_build_log_rejects_bad_timestamp() {
        assert!(matches!(
            build_log(request("ontem")),
            Err(AppError::ValidationError(_))
        ));
    }
}
