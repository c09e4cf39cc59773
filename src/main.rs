//! GDash 백엔드 메인 애플리케이션
//!
//! 환경 설정을 로드하고 MongoDB, Redis 연결을 만든 뒤 싱글톤 서비스를 초기화하고
//! Actix-web HTTP 서버를 구동합니다.

use std::process;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

use gdash_backend::caching::redis::RedisClient;
use gdash_backend::config::{Environment, FrontendConfig, ServerConfig};
use gdash_backend::core::registry::ServiceLocator;
use gdash_backend::db::Database;
use gdash_backend::repositories::users::UserRepository;
use gdash_backend::repositories::weather::WeatherLogRepository;
use gdash_backend::routes::configure_all_routes;
use gdash_backend::services::users::UserService;
use gdash_backend::utils::display_terminal::print_server_banner;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 로거보다 먼저 .env를 읽어야 RUST_LOG가 반영됩니다
    let env_file = load_env_file();
    init_logging();
    match env_file {
        Ok(name) => info!("{} 파일 로드 됨", name),
        Err(e) => warn!(".env 파일 로드 실패: {}", e),
    }

    info!("🚀 GDash 백엔드 시작중... (환경: {:?})", Environment::current());

    let (database, redis_client) = match initialize_data_stores().await {
        Ok(stores) => stores,
        Err(e) => {
            error!("❌ 데이터 스토어 연결 실패: {}", e);
            process::exit(1);
        }
    };

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    if let Err(e) = ServiceLocator::initialize_all().await {
        error!("❌ 서비스 초기화 실패: {}", e);
        process::exit(1);
    }

    if let Err(e) = run_startup_tasks().await {
        error!("❌ 기동 작업 실패: {}", e);
        process::exit(1);
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// `PROFILE`에 따라 `.env.prod` / `.env.dev` / `.env`를 로드합니다.
fn load_env_file() -> Result<String, dotenv::Error> {
    let profile = std::env::var("PROFILE").unwrap_or_default();

    let filename = match profile.as_str() {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => ".env",
    };

    dotenv::from_filename(filename).map(|_| filename.to_string())
}

/// `RUST_LOG`가 없으면 `info,actix_web=debug`
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

async fn initialize_data_stores() -> Result<(Arc<Database>, Arc<RedisClient>), Box<dyn std::error::Error>> {
    info!("📡 데이터베이스 연결 중...");
    let database = Arc::new(Database::new().await?);

    info!("📡 Redis 연결 중...");
    let redis_client = Arc::new(RedisClient::new().await?);
    info!("✅ Redis 연결 성공");

    Ok((database, redis_client))
}

/// 인덱스 생성과 기본 관리자 보장
async fn run_startup_tasks() -> Result<(), Box<dyn std::error::Error>> {
    UserRepository::instance().create_indexes().await?;
    WeatherLogRepository::instance().create_indexes().await?;
    info!("🗂️ MongoDB 인덱스 확인 완료");

    UserService::instance().ensure_default_admin().await?;

    Ok(())
}

async fn start_http_server() -> std::io::Result<()> {
    let host = ServerConfig::host();
    let port = ServerConfig::port();
    let frontend_url = FrontendConfig::url();

    let per_second = ServerConfig::rate_limit_per_second();
    let burst_size = ServerConfig::rate_limit_burst_size();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!("🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개", per_second, burst_size);

    print_server_banner(&host, port, &frontend_url);

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&frontend_url))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

/// 프론트엔드 단일 Origin만 허용하며 자격 증명을 지원합니다.
fn configure_cors(frontend_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_url)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .supports_credentials()
        .max_age(3600)
}
