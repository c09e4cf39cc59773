//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 JSON 캐시입니다.
//!
//! # 사용처
//!
//! - `UserRepository`: 이메일/ID 조회 결과 캐시 (TTL 600초), 변경 시 무효화
//! - `GoogleAuthService`: OAuth `state` 일회용 보관 (`oauth:state:{state}`)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("oauth:state:abc", &true, 600).await?;
//! let consumed: Option<bool> = cache.take("oauth:state:abc").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
