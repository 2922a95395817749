use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    domain::{Chain, NewWallet, WalletRecord},
    infrastructure::db::PgPool,
    repository::{StoreError, WalletStore},
};

// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, FromRow)]
struct WalletRow {
    id: Uuid,
    name: String,
    chain: String,
    address: String,
    inserted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WalletRow> for WalletRecord {
    type Error = StoreError;

    fn try_from(row: WalletRow) -> Result<Self, Self::Error> {
        let chain: Chain = row.chain.parse().map_err(|_| {
            StoreError::Corrupt(format!("wallet {} has chain {:?}", row.id, row.chain))
        })?;
        Ok(WalletRecord {
            id: row.id,
            name: row.name,
            chain,
            address: row.address,
            inserted_at: row.inserted_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL / CockroachDB 实现
///
/// 名称唯一性由 `wallets_name_key` 约束保证，多进程并发写入同样安全。
#[derive(Clone)]
pub struct PgWalletStore {
    pool: PgPool,
}

impl PgWalletStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WalletStore for PgWalletStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<WalletRecord>, StoreError> {
        let row = sqlx::query_as::<_, WalletRow>(
            r#"
            SELECT id, name, chain, address, inserted_at, updated_at
            FROM wallets
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(WalletRecord::try_from).transpose()
    }

    async fn insert(&self, wallet: NewWallet) -> Result<WalletRecord, StoreError> {
        let name = wallet.name.clone();

        // 时间戳取数据库的 now()，多进程写入时顺序不受各自时钟影响；
        // ON CONFLICT DO NOTHING：冲突时不返回行
        let result = sqlx::query_as::<_, WalletRow>(
            r#"
            INSERT INTO wallets (name, chain, address, inserted_at, updated_at)
            VALUES ($1, $2, $3, now(), now())
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name, chain, address, inserted_at, updated_at
            "#,
        )
        .bind(&wallet.name)
        .bind(wallet.chain.as_str())
        .bind(&wallet.address)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => WalletRecord::try_from(row),
            Ok(None) => Err(StoreError::NameTaken(name)),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Err(StoreError::NameTaken(name))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_recent(&self) -> Result<Vec<WalletRecord>, StoreError> {
        let rows = sqlx::query_as::<_, WalletRow>(
            r#"
            SELECT id, name, chain, address, inserted_at, updated_at
            FROM wallets
            ORDER BY inserted_at DESC, seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WalletRecord::try_from).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::infrastructure::db::health_check(&self.pool).await?;
        Ok(())
    }
}
