//! MongoDB 연결 관리
//!
//! [`Database`]는 드라이버 `Client`와 사용할 데이터베이스 이름을 묶은 얇은 래퍼입니다.
//! `Client`는 내부적으로 커넥션 풀을 가지므로 `Arc<Database>` 하나를 여러 리포지토리가 공유합니다.
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="user_accounts"
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use user_account_service::db::Database;
//! use user_account_service::repositories::users::MongoUserRepository;
//!
//! let database = Arc::new(Database::new().await?);
//! let user_repo = MongoUserRepository::new(database);
//! user_repo.create_indexes().await?;
//! ```

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::config::DatabaseConfig;
use crate::core::errors::{AppError, AppResult};

const APP_NAME: &str = "user_account_service";

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// `MONGODB_URI`, `DATABASE_NAME` 환경 변수로 연결합니다.
    pub async fn new() -> AppResult<Self> {
        Self::connect(&DatabaseConfig::uri(), &DatabaseConfig::database_name()).await
    }

    /// 연결 후 `ping` 명령으로 서버 응답을 확인합니다.
    /// 잘못된 URI나 응답하지 않는 서버는 `DatabaseError`가 됩니다.
    pub async fn connect(uri: &str, database_name: &str) -> AppResult<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB URI 파싱 실패: {}", e)))?;
        options.app_name = Some(APP_NAME.to_string());

        let database = Self {
            client: Client::with_options(options)?,
            database_name: database_name.to_string(),
        };

        database
            .get_database()
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;

        log::info!("✅ MongoDB 연결 성공: {}", database.database_name);
        Ok(database)
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
