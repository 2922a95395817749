use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::chain::Chain;

/// 已持久化的钱包记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: Uuid,
    pub name: String,
    pub chain: Chain,
    pub address: String,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待写入的钱包（已通过校验）
///
/// id 与时间戳都由存储层在插入时分配，inserted_at 与 updated_at 相同
#[derive(Debug, Clone)]
pub struct NewWallet {
    pub name: String,
    pub chain: Chain,
    pub address: String,
}
