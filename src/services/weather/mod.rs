//! 날씨 로그 서비스 모듈
//!
//! 워커가 보낸 로그 저장, 대시보드용 조회/통계, CSV/XLSX 내보내기를 담당합니다.

pub mod export_service;
pub mod weather_service;

pub use export_service::ExportService;
pub use weather_service::WeatherService;
