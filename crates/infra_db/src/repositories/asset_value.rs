//! Asset valuation repository implementation
//!
//! Valuations are stored and listed as-is; nothing here aggregates them.

use core_kernel::{AssetId, AssetValue, Granularity, NewAssetValue};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for OHLCV samples
#[derive(Debug, Clone)]
pub struct AssetValueRepository {
    pool: PgPool,
}

impl AssetValueRepository {
    /// Creates a new AssetValueRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a valuation sample
    ///
    /// `evaluated_at` defaults to the insertion time when unset.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if a price does not fit
    /// `NUMERIC(10,4)`, or `DatabaseError::ForeignKeyViolation` if either
    /// asset does not exist
    pub async fn insert(&self, value: &NewAssetValue) -> Result<AssetValue, DatabaseError> {
        value.validate()?;

        let inserted = sqlx::query_as::<_, AssetValue>(
            r#"
            INSERT INTO asset_values (
                asset_id, base_asset_id, evaluated_at, granularity,
                open, high, low, close, volume
            ) VALUES ($1, $2, COALESCE($3, CURRENT_TIMESTAMP), $4::granularity, $5, $6, $7, $8, $9)
            RETURNING
                id, asset_id, base_asset_id, evaluated_at, granularity::text AS granularity,
                open, high, low, close, volume
            "#,
        )
        .bind(value.asset_id)
        .bind(value.base_asset_id)
        .bind(value.evaluated_at)
        .bind(value.granularity)
        .bind(value.open)
        .bind(value.high)
        .bind(value.low)
        .bind(value.close)
        .bind(value.volume)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Lists samples of one asset/base pair at one granularity, oldest first
    pub async fn list(
        &self,
        asset_id: AssetId,
        base_asset_id: AssetId,
        granularity: Granularity,
    ) -> Result<Vec<AssetValue>, DatabaseError> {
        let values = sqlx::query_as::<_, AssetValue>(
            r#"
            SELECT
                id, asset_id, base_asset_id, evaluated_at, granularity::text AS granularity,
                open, high, low, close, volume
            FROM asset_values
            WHERE asset_id = $1 AND base_asset_id = $2 AND granularity = $3::granularity
            ORDER BY evaluated_at, id
            "#,
        )
        .bind(asset_id)
        .bind(base_asset_id)
        .bind(granularity)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }
}
