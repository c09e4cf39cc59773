//! 요청 처리 중에 쓰이는 인증/토큰/OAuth 모델

pub mod auth;
pub mod oauth;
pub mod token;
