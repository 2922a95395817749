// 钱包数据访问 Repository

pub mod memory;
pub mod wallets;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewWallet, WalletRecord};

pub use memory::InMemoryWalletStore;
pub use wallets::PgWalletStore;

/// 存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// name 唯一约束冲突（并发插入同名钱包时由存储层报告）
    #[error("wallet name already taken: {0}")]
    NameTaken(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 库中数据无法映射为领域模型
    #[error("corrupt wallet row: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// ============ Repository Trait ============

#[async_trait]
pub trait WalletStore: Send + Sync {
    /// 按名称精确查询（区分大小写）
    async fn find_by_name(&self, name: &str) -> Result<Option<WalletRecord>, StoreError>;

    /// 插入新钱包；名称已存在时必须返回 [`StoreError::NameTaken`]，
    /// 检查与插入在存储内部原子完成
    async fn insert(&self, wallet: NewWallet) -> Result<WalletRecord, StoreError>;

    /// 全部钱包，按 inserted_at 倒序
    async fn list_recent(&self) -> Result<Vec<WalletRecord>, StoreError>;

    /// 健康检查
    async fn ping(&self) -> Result<(), StoreError>;
}
