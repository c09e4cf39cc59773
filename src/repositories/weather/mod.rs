pub mod weather_log_repo;

pub use weather_log_repo::{LogFilter, WeatherLogRepository};
