//! 수집기 알림 서비스
//!
//! `POST {COLLECTOR_URL}/city`에 `{"city": ...}`를 보내 해당 도시의 날씨 수집을
//! 시작하게 합니다.

use std::sync::Arc;
use std::time::Duration;

use actix_web::rt::task::JoinHandle;
use serde_json::json;
use singleton_macro::service;

use crate::config::CollectorConfig;
use crate::core::errors::AppError;

#[service(name = "collector")]
pub struct CollectorService {
    client: reqwest::Client,
}

impl CollectorService {
    /// 수집기에 도시를 알립니다. 실패 시 에러를 반환하는 기본 연산입니다.
    pub async fn notify(&self, base_url: &str, city: &str) -> Result<(), AppError> {
        let url = format!("{}/city", base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_millis(CollectorConfig::timeout_ms()))
            .json(&json!({ "city": city }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("수집기 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "수집기 응답 오류 ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    /// 수집기에 도시 수집 시작을 요청합니다. 실패는 로그만 남깁니다.
    pub async fn start_collection(&self, base_url: &str, city: &str) {
        match self.notify(base_url, city).await {
            Ok(()) => log::info!("📡 수집기에 도시 전달: {}", city),
            Err(e) => log::warn!("⚠️ 수집기 알림 실패 ({}): {}", city, e),
        }
    }

    /// 응답을 기다리지 않고 설정된 수집기(`COLLECTOR_URL`)로 백그라운드 알림을 보냅니다.
    pub fn spawn_collection(self: &Arc<Self>, city: String) -> JoinHandle<()> {
        self.spawn_collection_to(CollectorConfig::url(), city)
    }

    pub fn spawn_collection_to(self: &Arc<Self>, base_url: String, city: String) -> JoinHandle<()> {
        let service = self.clone();
        actix_web::rt::spawn(async move {
            service.start_collection(&base_url, &city).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service() -> CollectorService {
        CollectorService {
            client: reqwest::Client::new(),
        }
    }

    #[actix_web::test]
    async fn test_notify_posts_city() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/city"))
            .and(body_json(json!({ "city": "Manaus" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = service().notify(&format!("{}/", server.uri()), "Manaus").await;

        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn test_notify_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/city"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let result = service().notify(&server.uri(), "Belém").await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_notify_unreachable_collector() {
        let result = service().notify("http://127.0.0.1:1", "Natal").await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_failed_background_collection_does_not_surface() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/city"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let handle = Arc::new(service()).spawn_collection_to(server.uri(), "Maceió".into());

        assert!(handle.await.is_ok());
    }

    #[actix_web::test]
    async fn test_spawn_returns_before_slow_collector_answers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/city"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let started = std::time::Instant::now();
        let handle = Arc::new(service()).spawn_collection_to(server.uri(), "Natal".into());

        assert!(started.elapsed() < Duration::from_millis(500));
        handle.abort();
    }
}
