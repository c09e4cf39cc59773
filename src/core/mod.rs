//! # Core Framework Module
//!
//! 백엔드 서비스를 위한 핵심 프레임워크 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: Spring의 ApplicationContext + BeanFactory 역할
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 서비스 등록
//! - **의존성 해결**: `Arc<T>` 필드 자동 주입
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: `{statusCode, message, error}` JSON 응답으로 자동 변환
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 프레임워크 |
//! |--------|---------------|
//! | `@Service` | `#[service]` 매크로 |
//! | `@Repository` | `#[repository]` 매크로 |
//! | `ApplicationContext` | `ServiceLocator` |
//! | `@Autowired` | `Arc<T>` 필드 자동 주입 |
//! | `@ExceptionHandler` | `AppError::error_response()` |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! #[repository(name = "weatherlog", collection = "weatherlogs")]
//! pub struct WeatherLogRepository {
//!     db: Arc<Database>,
//! }
//!
//! #[service(name = "weather")]
//! pub struct WeatherService {
//!     weather_log_repo: Arc<WeatherLogRepository>,
//! }
//!
//! let service = WeatherService::instance();
//! ```
//!
//! ## 트러블슈팅
//!
//! ### 순환 참조 감지
//! ```text
//! ❌ Circular dependency detected for type: UserService
//! ```
//! **해결**: 서비스 계층을 단방향 의존성으로 재설계
//!
//! ### 미등록 타입 에러
//! ```text
//! panic: Service not found: gdash_backend::services::MailService. ...
//! ```
//! **해결**: 매크로의 `name`이 타입 접두사의 소문자와 일치하는지 확인
//! (`MailService` → `name = "mail"`)

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
