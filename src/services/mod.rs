//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로로 선언된 싱글톤 서비스들이며, `Arc<T>` 필드는
//! `ServiceLocator`를 통해 자동 주입됩니다.
//!
//! | 모듈 | 서비스 |
//! |------|--------|
//! | [`users`] | `UserService` |
//! | [`auth`] | `AuthService`, `TokenService`, `GoogleAuthService` |
//! | [`collector`] | `CollectorService` |
//! | [`mail`] | `MailService` |
//! | [`weather`] | `WeatherService`, `ExportService` |
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, weather::WeatherService};
//!
//! let user_service = UserService::instance();
//! let stats = WeatherService::instance().get_stats(Some("Recife")).await?;
//! ```

pub mod auth;
pub mod collector;
pub mod mail;
pub mod users;
pub mod weather;
