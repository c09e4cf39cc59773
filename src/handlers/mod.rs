//! # HTTP Request Handlers Module
//!
//! Controller 레이어입니다. 핸들러는 요청을 DTO로 받아 검증한 뒤 서비스 싱글톤에
//! 위임하고, 결과를 JSON으로 돌려줍니다. 에러는 `?`로 전파되어
//! [`AppError`](crate::core::errors::AppError)의 표준 응답 형식으로 변환됩니다.
//!
//! ```text
//! Client (React SPA, 수집 워커)
//!         │
//! Handlers (이 모듈)       ← Web Layer
//!         │
//! Services                ← Service Layer
//!         │
//! Repositories            ← Repository Layer (MongoDB + Redis)
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 로그인, 가입, Google OAuth, 비밀번호 재설정 (`/api/auth`)
//! - **`users`**: 내 정보와 관리자용 사용자 관리 (`/api/users`)
//! - **`weather`**: 날씨 로그 저장, 조회, 통계, 내보내기 (`/api/weather`)
//!
//! 라우트 등록은 [`crate::routes`]에서 합니다.
//!
//! ```rust,ignore
//! #[post("/login")]
//! pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;
//!     let response = AuthService::instance().login(&payload.email, &payload.password).await?;
//!     Ok(HttpResponse::Ok().json(response))
//! }
//! ```

pub mod auth;
pub mod users;
pub mod weather;
