//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB에 저장되는 문서 (User, WeatherLog)
//! ├── dto       - HTTP 요청/응답 계약
//! └── models    - 인증 컨텍스트, JWT 클레임, OAuth 프로필
//! ```
//!
//! 엔티티는 저장 형식(camelCase 필드, BSON 날짜)을 그대로 따르고,
//! 클라이언트에 나가는 값은 항상 `dto`의 응답 타입을 거칩니다.
//! 비밀번호 해시와 재설정 토큰은 응답 타입에 존재하지 않습니다.

pub mod entities;
pub mod dto;
pub mod models;
