//! 공용 유틸리티
//!
//! - [`display_terminal`] - 기동 과정 터미널 출력
//! - [`date_utils`] - 날짜 파싱 및 포맷 변환

pub mod date_utils;
pub mod display_terminal;
