use std::sync::Arc;

use crate::{
    config::{Config, StorageBackend},
    infrastructure::db,
    repository::{InMemoryWalletStore, PgWalletStore, WalletStore},
    service::WalletRegistry,
};

/// 应用状态
/// 包含所有共享资源（只读句柄，无进程级可变状态）
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<WalletRegistry>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(registry: Arc<WalletRegistry>, config: Arc<Config>) -> Self {
        Self { registry, config }
    }

    /// 按配置选择存储后端并创建应用状态
    pub async fn from_config(config: Arc<Config>) -> anyhow::Result<Self> {
        let store: Arc<dyn WalletStore> = match config.storage.backend {
            StorageBackend::Postgres => {
                let pool = db::init_pool(&config.database).await?;
                tracing::info!("✅ Database connected");

                if config.database.run_migrations {
                    db::run_migrations(&pool).await?;
                    tracing::info!("✅ Database migrations completed");
                } else {
                    tracing::info!("⏭️ Database migrations skipped (RUN_MIGRATIONS=0)");
                }
                Arc::new(PgWalletStore::new(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory wallet store; data is lost on restart");
                Arc::new(InMemoryWalletStore::new())
            }
        };

        Ok(Self::new(Arc::new(WalletRegistry::new(store)), config))
    }
}
