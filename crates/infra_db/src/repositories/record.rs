//! Ledger record repository implementation
//!
//! `type` is bound as text and cast to `record_type`, and read back as text.

use chrono::{DateTime, Utc};
use core_kernel::{Account, AccountId, Asset, Record, RecordId, RecordType};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for deposits, withdrawals and balance adjustments
#[derive(Debug, Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    /// Creates a new RecordRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a ledger entry for an already-persisted account and asset
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ForeignKeyViolation` if the account or asset
    /// row does not exist
    pub async fn insert(
        &self,
        account: &Account,
        asset: &Asset,
        record_type: RecordType,
        created_at: DateTime<Utc>,
        quantity: i64,
    ) -> Result<Record, DatabaseError> {
        let record = sqlx::query_as::<_, Record>(
            r#"
            INSERT INTO records (account_id, asset_id, "type", created_at, quantity)
            VALUES ($1, $2, $3::record_type, $4, $5)
            RETURNING id, account_id, asset_id, "type"::text AS "type", created_at, quantity
            "#,
        )
        .bind(account.id)
        .bind(asset.id)
        .bind(record_type)
        .bind(created_at)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Retrieves a record by its key
    pub async fn get_by_id(&self, id: RecordId) -> Result<Record, DatabaseError> {
        sqlx::query_as::<_, Record>(
            r#"
            SELECT id, account_id, asset_id, "type"::text AS "type", created_at, quantity
            FROM records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Record", "id", id))
    }

    /// Lists the records of an account in the order they were created
    pub async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<Record>, DatabaseError> {
        let records = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, account_id, asset_id, "type"::text AS "type", created_at, quantity
            FROM records
            WHERE account_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
