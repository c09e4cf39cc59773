//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 프론트엔드/수집기 연동, 관리자, 내보내기 설정
//! - [`auth_config`] - JWT, Google OAuth, 비밀번호 재설정 설정
//! - [`mail_config`] - SMTP 설정
//!
//! ## 설계 원칙
//!
//! - 모든 설정은 환경 변수에서 읽고, 누락 시 문서화된 기본값을 사용합니다.
//! - `.env` 파일은 `PROFILE`(`prod`/`dev`)에 따라 `main`에서 로드됩니다.
//! - 설정 구조체는 상태를 갖지 않는 unit struct 이며 연관 함수로 값을 제공합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtConfig};
//!
//! let env = Environment::current();
//! let bind = (ServerConfig::host(), ServerConfig::port());
//! let ttl = JwtConfig::expiration_seconds();
//! ```
//!
//! ## Spring과의 비교
//!
//! | Spring | Rust (이 프로젝트) |
//! |--------|-------------------|
//! | `@Configuration` | `pub struct XxxConfig` |
//! | `@Value("${property}")` | `env::var("PROPERTY")` |
//! | `@Profile("dev")` | `Environment::Development` |
//! | `application.yml` | `.env` 파일 |

pub mod data_config;
pub mod auth_config;
pub mod mail_config;

pub use data_config::*;
pub use auth_config::*;
pub use mail_config::*;
