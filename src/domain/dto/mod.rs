//! HTTP 요청/응답 DTO
//!
//! 타입은 항상 `dto::users::request::LoginRequest`처럼 기능/방향 경로로 가져옵니다.

pub mod users;
pub mod weather;
