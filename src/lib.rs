//! GDash 백엔드
//!
//! 날씨 대시보드 SPA를 위한 REST 백엔드입니다.
//!
//! # Features
//!
//! - **사용자 관리**: 로컬 가입, 내 정보 수정, 비밀번호 변경, 관리자용 목록/삭제
//! - **JWT 인증**: HS256 액세스 토큰, Google 가입 완료용 임시 토큰
//! - **OAuth 2.0**: Google 로그인 (state는 Redis에 1회용으로 저장)
//! - **비밀번호 재설정**: 해시된 1회용 토큰 + SMTP 메일
//! - **날씨 로그**: 수집 워커가 보낸 로그 저장, 페이지 조회, 통계, CSV/XLSX 내보내기
//! - **싱글톤 DI**: `#[service]` / `#[repository]` 매크로 기반 자동 의존성 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/* + /health
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증 / 응답 변환
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 외부 연동 (Google, SMTP, 수집기)
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Repositories   │ ← MongoDB 컬렉션 + Redis 캐시
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use gdash_backend::services::auth::AuthService;
//!
//! let response = AuthService::instance().login("ana@example.com", "123456").await?;
//! println!("{}", response.access_token);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
