//! API 라우트 설정 모듈
//!
//! 모든 API 라우트는 전역 접두사 `/api` 아래에 등록되고, 헬스체크만 접두사 밖에 있습니다.
//!
//! ```text
//! /health                      public
//! /api/auth/*                  public (profile, test는 JWT)
//! /api/users/*                 JWT (스코프 전체)
//! /api/weather/logs   POST     public (수집 워커)
//! /api/weather/*               JWT
//! ```
//!
//! JSON 본문/쿼리 파싱 실패도 [`AppError`]의 표준 400 응답으로 변환됩니다.
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{get, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub const API_PREFIX: &str = "/api";

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(health_check)
        .service(
            web::scope(API_PREFIX)
                .configure(configure_auth_routes)
                .configure(configure_user_routes)
                .configure(configure_weather_routes),
        );
}

/// 잘못된 JSON, 알 수 없는 필드, 타입 불일치는 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        log::debug!("JSON 본문 파싱 실패: {}", err);
        AppError::ValidationError(err.to_string()).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        log::debug!("쿼리 파싱 실패: {}", err);
        AppError::ValidationError(err.to_string()).into()
    })
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            // 로컬 인증
            .service(handlers::auth::login)
            .service(handlers::auth::register)
            // Google OAuth
            .service(handlers::auth::google_login)
            .service(handlers::auth::google_callback)
            .service(handlers::auth::complete_google_registration)
            // 보호된 라우트
            .service(handlers::auth::profile)
            .service(handlers::auth::protected_test)
            // 비밀번호 재설정
            .service(handlers::auth::forgot_password)
            .service(handlers::auth::reset_password),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(AuthMiddleware::required())
            // `/me`가 `/{user_id}`보다 먼저 매칭되어야 합니다
            .service(handlers::users::get_me)
            .service(handlers::users::update_me)
            .service(handlers::users::update_password)
            .service(handlers::users::list_users)
            .service(handlers::users::get_user)
            .service(handlers::users::delete_user),
    );
}

fn configure_weather_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/weather")
            .service(handlers::weather::create_log)
            .service(handlers::weather::list_logs)
            .service(handlers::weather::get_log)
            .service(handlers::weather::get_stats)
            .service(handlers::weather::export_csv)
            .service(handlers::weather::export_xlsx),
    );
}

/// 서비스 상태 확인
///
/// MongoDB와 Redis 중 하나라도 응답하지 않으면 `status`가 `"degraded"`가 됩니다.
/// 로드밸런서가 프로세스 생존만 확인할 수 있도록 상태 코드는 항상 200입니다.
///
/// ```json
/// {
///   "status": "ok",
///   "service": "gdash_backend",
///   "version": "0.1.0",
///   "timestamp": "2025-12-03T10:00:00+00:00",
///   "checks": { "database": "up", "cache": "up" }
/// }
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    let database_up = match ServiceLocator::try_get::<Database>() {
        Some(db) => db.ping().await,
        None => false,
    };
    let cache_up = match ServiceLocator::try_get::<RedisClient>() {
        Some(redis) => redis.ping().await,
        None => false,
    };

    HttpResponse::Ok().json(health_body(database_up, cache_up))
}

fn health_body(database_up: bool, cache_up: bool) -> serde_json::Value {
    let label = |up: bool| if up { "up" } else { "down" };

    json!({
        "status": if database_up && cache_up { "ok" } else { "degraded" },
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "checks": {
            "database": label(database_up),
            "cache": label(cache_up),
        }
    })
}
