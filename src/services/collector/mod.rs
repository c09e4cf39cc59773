//! 날씨 수집기(Collector) 연동 모듈
//!
//! 사용자가 로그인/가입하거나 도시를 바꾸면 해당 도시의 수집을 시작하도록
//! 수집기 서비스에 알립니다. 수집기 장애는 사용자 요청을 실패시키지 않습니다.

pub mod collector_service;

pub use collector_service::CollectorService;
