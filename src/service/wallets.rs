//! 钱包登记服务
//!
//! 负责字段校验、地址格式校验、名称唯一性与持久化编排。
//! 自身不持有可变状态，唯一共享资源是存储句柄。

use std::sync::Arc;

use thiserror::Error;

use crate::{
    domain::{NewWallet, ValidationError, WalletRecord},
    repository::{StoreError, WalletStore},
    utils::address_validator::AddressValidator,
};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Wallet name already exists: {0}")]
    DuplicateName(String),

    #[error("storage failure: {0}")]
    StorageFailure(#[source] StoreError),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NameTaken(name) => Self::DuplicateName(name),
            other => Self::StorageFailure(other),
        }
    }
}

pub struct WalletRegistry {
    store: Arc<dyn WalletStore>,
}

impl WalletRegistry {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self { store }
    }

    /// 登记新钱包
    ///
    /// 校验顺序：name → chain → address → 地址格式 → 名称唯一性。
    /// 唯一性最终由存储层保证，并发同名请求只有一个成功。
    pub async fn add(
        &self,
        name: &str,
        chain: &str,
        address: &str,
    ) -> Result<WalletRecord, RegistryError> {
        let input = Self::validate_input(name, chain, address)?;

        let existing = self
            .store
            .find_by_name(&input.name)
            .await
            .map_err(|e| self.store_error("find_by_name", e))?;
        if existing.is_some() {
            tracing::warn!(name = %input.name, "wallet name already registered");
            return Err(RegistryError::DuplicateName(input.name));
        }

        let record = self
            .store
            .insert(input)
            .await
            .map_err(|e| self.store_error("insert", e))?;
        tracing::info!(
            wallet_id = %record.id,
            chain = %record.chain,
            "wallet registered"
        );
        Ok(record)
    }

    /// 全部钱包，最新登记的在前；每次都从存储读取
    pub async fn list(&self) -> Result<Vec<WalletRecord>, RegistryError> {
        self.store
            .list_recent()
            .await
            .map_err(|e| self.store_error("list_recent", e))
    }

    /// 存储健康检查
    pub async fn store_ok(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    fn validate_input(
        name: &str,
        chain: &str,
        address: &str,
    ) -> Result<NewWallet, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if chain.trim().is_empty() {
            return Err(ValidationError::MissingField("chain"));
        }
        let chain = AddressValidator::validate_raw(address, chain)?;

        Ok(NewWallet {
            name: name.to_string(),
            chain,
            address: address.to_string(),
        })
    }

    /// 名称冲突（并发插入时由存储层发现）是业务错误，其余才记为存储故障
    fn store_error(&self, op: &'static str, err: StoreError) -> RegistryError {
        match RegistryError::from(err) {
            RegistryError::DuplicateName(name) => {
                tracing::warn!(op, name = %name, "wallet name taken by concurrent insert");
                RegistryError::DuplicateName(name)
            }
            other => {
                tracing::error!(op, error = ?other, "wallet store operation failed");
                other
            }
        }
    }
}
