//! # MongoDB 연결 관리
//!
//! 애플리케이션 전체에서 공유되는 MongoDB 클라이언트 래퍼입니다.
//! `main`에서 한 번 생성하여 `ServiceLocator::set`으로 등록하면,
//! `db` 필드를 가진 리포지토리에 자동 주입됩니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! MONGODB_URI=mongodb://localhost:27017   # 기본값
//! DATABASE_NAME=gdash                     # 기본값
//! ```

use std::env;

use log::info;
use mongodb::{Client, options::ClientOptions};

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 환경 변수로 클라이언트를 만들고 `ping`으로 연결을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mongodb_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "gdash".to_string());

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("gdash_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// 헬스 체크용 `ping`
    pub async fn ping(&self) -> bool {
        self.get_database()
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await
            .is_ok()
    }
}
