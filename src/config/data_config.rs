//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 프론트엔드/수집기 연동, 기본 관리자 계정,
//! 내보내기 포맷 등 인증 이외의 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "production".to_string());
        Self::from_str(&raw)
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위의 정수이면 그 값을 사용하고,
    /// 그렇지 않으면 환경별 기본값을 사용합니다.
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트. 기본값: 3000
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3000)
    }

    /// 서버가 바인딩할 호스트 주소. 기본값: "0.0.0.0" (모든 인터페이스)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 초당 허용 요청 수 (actix-governor). 기본값: 100
    pub fn rate_limit_per_second() -> u64 {
        env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(100)
    }

    /// 버스트 허용량. 기본값: 200
    pub fn rate_limit_burst_size() -> u32 {
        env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(200)
    }
}

/// SPA 프론트엔드 설정
///
/// CORS 허용 오리진과 OAuth 콜백/비밀번호 재설정 링크의 기준 URL로 쓰입니다.
pub struct FrontendConfig;

impl FrontendConfig {
    /// 프론트엔드 기준 URL (끝의 `/` 제거). 기본값: `http://localhost:5173`
    pub fn url() -> String {
        env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

/// 날씨 수집기(Collector) 연동 설정
pub struct CollectorConfig;

impl CollectorConfig {
    /// 수집기 기준 URL. 기본값: `http://localhost:8000`
    pub fn url() -> String {
        env::var("COLLECTOR_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 수집 요청 타임아웃(ms). 기본값: 5000
    pub fn timeout_ms() -> u64 {
        env::var("COLLECTOR_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(5000)
    }
}

/// 기동 시 생성되는 기본 관리자 계정 설정
pub struct AdminConfig;

impl AdminConfig {
    pub fn email() -> String {
        env::var("ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@example.com".to_string())
            .to_lowercase()
    }

    pub fn password() -> String {
        env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123456".to_string())
    }

    pub fn city() -> String {
        env::var("ADMIN_CITY").unwrap_or_else(|_| "São Paulo".to_string())
    }
}

/// CSV/XLSX 내보내기 설정
pub struct ExportConfig;

impl ExportConfig {
    /// 날짜 문자열을 렌더링할 UTC 오프셋(분).
    ///
    /// 기본값은 브라질리아 시간(UTC-3)인 -180 입니다.
    /// 유효 범위(±24h)를 벗어나면 기본값을 사용합니다.
    pub fn utc_offset_minutes() -> i32 {
        env::var("EXPORT_UTC_OFFSET_MINUTES")
            .ok()
            .and_then(|raw| raw.parse::<i32>().ok())
            .filter(|minutes| minutes.abs() < 24 * 60)
            .unwrap_or(-180)
    }
}
