//! MongoDB에 저장되는 도메인 엔티티

pub mod users;
pub mod weather;
