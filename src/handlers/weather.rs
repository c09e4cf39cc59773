//! Weather Log HTTP Handlers
//!
//! `/api/weather/*` 엔드포인트입니다. `POST /logs`는 수집 워커가 토큰 없이 호출하고,
//! 나머지 조회/내보내기는 로그인한 사용자만 사용할 수 있습니다.

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::weather::request::{CityQuery, CreateWeatherLogRequest, ExportQuery, LogsQuery, non_blank};
use crate::middlewares::AuthMiddleware;
use crate::services::weather::{ExportService, WeatherService};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// `weather-logs-{millis}.{ext}`
pub fn export_filename(extension: &str) -> String {
    format!("weather-logs-{}.{}", chrono::Utc::now().timestamp_millis(), extension)
}

fn attachment(filename: String) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    }
}

#[post("/logs")]
pub async fn create_log(payload: web::Json<CreateWeatherLogRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let saved = WeatherService::instance().create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(saved))
}

#[get("/logs", wrap = "AuthMiddleware::required()")]
pub async fn list_logs(query: web::Query<LogsQuery>) -> Result<HttpResponse, AppError> {
    let page = WeatherService::instance().find_all(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/logs/{log_id}", wrap = "AuthMiddleware::required()")]
pub async fn get_log(log_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let log = WeatherService::instance().find_one(&log_id).await?;
    Ok(HttpResponse::Ok().json(log))
}

#[get("/stats", wrap = "AuthMiddleware::required()")]
pub async fn get_stats(query: web::Query<CityQuery>) -> Result<HttpResponse, AppError> {
    let stats = WeatherService::instance()
        .get_stats(non_blank(&query.city))
        .await?;

    Ok(HttpResponse::Ok().json(stats))
}

#[get("/export/csv", wrap = "AuthMiddleware::required()")]
pub async fn export_csv(query: web::Query<ExportQuery>) -> Result<HttpResponse, AppError> {
    let body = ExportService::instance().export_csv(&query).await?;

    Ok(HttpResponse::Ok()
        .content_type(CSV_CONTENT_TYPE)
        .insert_header((header::CONTENT_DISPOSITION, attachment(export_filename("csv"))))
        .body(body))
}

#[get("/export/xlsx", wrap = "AuthMiddleware::required()")]
pub async fn export_xlsx(query: web::Query<ExportQuery>) -> Result<HttpResponse, AppError> {
    let bytes = ExportService::instance().export_xlsx(&query).await?;

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((header::CONTENT_DISPOSITION, attachment(export_filename("xlsx"))))
        .body(bytes))
}
