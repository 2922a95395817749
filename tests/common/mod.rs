//! 测试辅助模块
//! 提供内存存储的应用状态、故障存储和常用地址

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use walletfolio::{
    api,
    app_state::AppState,
    config::{Config, DatabaseConfig, LoggingConfig, ServerConfig, StorageBackend, StorageConfig},
    domain::{NewWallet, WalletRecord},
    repository::{InMemoryWalletStore, StoreError, WalletStore},
    service::WalletRegistry,
};

pub const ETH_ADDR: &str = "0x742d35Cc6634C0532925a3b8D6Ac6C77AF2AE53f";
pub const SOL_ADDR: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
pub const BTC_ADDR: &str = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";

/// 测试数据库URL
pub fn test_database_url() -> String {
    std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost:5432/walletfolio_test".into())
}

/// 不读环境变量的内存后端配置
pub fn test_config() -> Config {
    Config {
        database: DatabaseConfig {
            url: test_database_url(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 60,
            run_migrations: false,
        },
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".into(),
            cors_allow_origins: "*".into(),
        },
        logging: LoggingConfig {
            level: "debug".into(),
            format: "text".into(),
            enable_file_logging: false,
            log_file_path: None,
        },
        storage: StorageConfig {
            backend: StorageBackend::Memory,
        },
    }
}

pub fn registry_with(store: Arc<dyn WalletStore>) -> Arc<WalletRegistry> {
    Arc::new(WalletRegistry::new(store))
}

pub fn memory_registry() -> Arc<WalletRegistry> {
    registry_with(Arc::new(InMemoryWalletStore::new()))
}

/// 创建测试应用状态
pub fn create_test_app_state(store: Arc<dyn WalletStore>) -> Arc<AppState> {
    Arc::new(AppState::new(registry_with(store), Arc::new(test_config())))
}

pub fn test_app() -> Router {
    api::routes(create_test_app_state(Arc::new(InMemoryWalletStore::new())))
}

pub fn failing_app() -> Router {
    api::routes(create_test_app_state(Arc::new(FailingStore)))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// 所有操作都失败的存储，错误里带内部细节，用来检查不外泄
pub struct FailingStore;

#[async_trait]
impl WalletStore for FailingStore {
    async fn find_by_name(&self, _name: &str) -> Result<Option<WalletRecord>, StoreError> {
        Err(StoreError::Unavailable(
            "connection refused: 10.1.2.3:5432".into(),
        ))
    }

    async fn insert(&self, _wallet: NewWallet) -> Result<WalletRecord, StoreError> {
        Err(StoreError::Unavailable(
            "connection refused: 10.1.2.3:5432".into(),
        ))
    }

    async fn list_recent(&self) -> Result<Vec<WalletRecord>, StoreError> {
        Err(StoreError::Unavailable(
            "connection refused: 10.1.2.3:5432".into(),
        ))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("down".into()))
    }
}

/// 模拟并发重名：预检查看不到同名记录，插入时才由存储层报告冲突
#[derive(Default)]
pub struct RacingStore {
    pub inserts: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl WalletStore for RacingStore {
    async fn find_by_name(&self, _name: &str) -> Result<Option<WalletRecord>, StoreError> {
        Ok(None)
    }

    async fn insert(&self, wallet: NewWallet) -> Result<WalletRecord, StoreError> {
        self.inserts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(StoreError::NameTaken(wallet.name))
    }

    async fn list_recent(&self) -> Result<Vec<WalletRecord>, StoreError> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
