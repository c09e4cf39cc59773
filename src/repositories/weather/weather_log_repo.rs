//! 날씨 로그 리포지토리
//!
//! 로그는 워커가 한 번 쓰고 대시보드가 여러 번 읽는 구조라 캐시를 두지 않습니다.
//! 조회 조건은 [`LogFilter`]로 모아 목록/통계/내보내기가 같은 필터를 공유합니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::{DateTime, Document, doc};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::weather::{WeatherLog, WeatherStats};
use crate::repositories::{db_error, is_duplicate_key, parse_object_id};

/// 도시/기간 조건
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub city: Option<String>,
    /// `timestamp >= start`
    pub start: Option<DateTime>,
    /// `timestamp <= end`
    pub end: Option<DateTime>,
}

impl LogFilter {
    pub fn by_city(city: Option<&str>) -> Self {
        Self {
            city: city.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(ref city) = self.city {
            filter.insert("location.city", city);
        }

        let mut range = Document::new();
        if let Some(start) = self.start {
            range.insert("$gte", start);
        }
        if let Some(end) = self.end {
            range.insert("$lte", end);
        }
        if !range.is_empty() {
            filter.insert("timestamp", range);
        }

        filter
    }
}

/// `$match` → `$group` 통계 파이프라인
fn stats_pipeline(filter: &LogFilter) -> Vec<Document> {
    vec![
        doc! { "$match": filter.to_document() },
        doc! {
            "$group": {
                "_id": null,
                "avgTemp": { "$avg": "$weather.temperature" },
                "maxTemp": { "$max": "$weather.temperature" },
                "minTemp": { "$min": "$weather.temperature" },
                "avgHumidity": { "$avg": "$weather.humidity" },
                "count": { "$sum": 1 },
            }
        },
    ]
}

#[repository(name = "weatherlog", collection = "weatherlogs")]
pub struct WeatherLogRepository {
    db: Arc<Database>,
}

impl WeatherLogRepository {
    /// `createdAt`/`updatedAt`을 채워 저장합니다. `external_id`가 이미 있으면 409.
    pub async fn insert(&self, mut log: WeatherLog) -> Result<WeatherLog, AppError> {
        let now = DateTime::now();
        log.created_at = Some(now);
        log.updated_at = Some(now);

        let result = self
            .collection::<WeatherLog>()
            .insert_one(&log)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("Log já processado anteriormente".to_string())
                } else {
                    db_error(e)
                }
            })?;

        log.id = result.inserted_id.as_object_id();
        Ok(log)
    }

    /// 최신순 페이지 조회
    pub async fn find_page(
        &self,
        filter: &LogFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<WeatherLog>, AppError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.collection::<WeatherLog>()
            .find(filter.to_document())
            .sort(doc! { "timestamp": -1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    pub async fn count(&self, filter: &LogFilter) -> Result<u64, AppError> {
        self.collection::<WeatherLog>()
            .count_documents(filter.to_document())
            .await
            .map_err(db_error)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<WeatherLog>, AppError> {
        let object_id = parse_object_id(id)?;

        self.collection::<WeatherLog>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(db_error)
    }

    /// 일치하는 로그가 없으면 `None`
    pub async fn stats(&self, filter: &LogFilter) -> Result<Option<WeatherStats>, AppError> {
        let mut cursor = self
            .collection::<WeatherLog>()
            .aggregate(stats_pipeline(filter))
            .with_type::<WeatherStats>()
            .await
            .map_err(db_error)?;

        cursor.try_next().await.map_err(db_error)
    }

    /// 내보내기용 전체 조회 (최신순)
    pub async fn find_for_export(&self, filter: &LogFilter) -> Result<Vec<WeatherLog>, AppError> {
        self.collection::<WeatherLog>()
            .find(filter.to_document())
            .sort(doc! { "timestamp": -1 })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = [
            IndexModel::builder()
                .keys(doc! { "external_id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("external_id_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "location.city": 1, "timestamp": -1 })
                .options(IndexOptions::builder().name("city_timestamp".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "timestamp": -1 })
                .options(IndexOptions::builder().name("timestamp_desc".to_string()).build())
                .build(),
        ];

        self.collection::<WeatherLog>()
            .create_indexes(indexes)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
