//! 内存实现：用于测试与 `STORAGE_BACKEND=memory`
//!
//! 检查名称、取时间戳与插入在同一把写锁内完成。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{NewWallet, WalletRecord},
    repository::{StoreError, WalletStore},
};

#[derive(Debug, Default)]
pub struct InMemoryWalletStore {
    // 按插入顺序追加
    records: RwLock<Vec<WalletRecord>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert_at<F>(&self, wallet: NewWallet, clock: F) -> Result<WalletRecord, StoreError>
    where
        F: FnOnce() -> DateTime<Utc>,
    {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.name == wallet.name) {
            return Err(StoreError::NameTaken(wallet.name));
        }

        let now = clock();

        let record = WalletRecord {
            id: Uuid::new_v4(),
            name: wallet.name,
            chain: wallet.chain,
            address: wallet.address,
            inserted_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<WalletRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.name == name).cloned())
    }

    async fn insert(&self, wallet: NewWallet) -> Result<WalletRecord, StoreError> {
        self.insert_at(wallet, Utc::now).await
    }

    async fn list_recent(&self) -> Result<Vec<WalletRecord>, StoreError> {
        let records = self.records.read().await;
        // 先反转再稳定排序：时间戳相同的记录，后插入的排在前面
        let mut out: Vec<WalletRecord> = records.iter().rev().cloned().collect();
        out.sort_by(|a, b| b.inserted_at.cmp(&a.inserted_at));
        Ok(out)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
