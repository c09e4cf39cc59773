//! 사용자 관리 서비스 모듈
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 이메일 중복 방지
//! - 응답 DTO 변환 시 비밀번호/재설정 토큰 제거

pub mod user_service;

pub use user_service::UserService;
