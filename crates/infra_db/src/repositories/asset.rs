//! Asset repository implementation
//!
//! Assets are looked up by any of their three unique keys: name, ticker
//! symbol or ISIN.

use core_kernel::{Asset, AssetId, NewAsset};
use sqlx::PgPool;

use crate::error::DatabaseError;

const ASSET_COLUMNS: &str = "id, name, symbol, isin, description";

/// Repository for tradable assets
#[derive(Debug, Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    /// Creates a new AssetRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves the asset whose symbol matches exactly
    pub async fn get_by_symbol(&self, symbol: &str) -> Result<Asset, DatabaseError> {
        self.find_first("symbol", symbol)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Asset", "symbol", symbol))
    }

    /// Retrieves the asset with the given name
    pub async fn get_by_name(&self, name: &str) -> Result<Asset, DatabaseError> {
        self.find_first("name", name)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Asset", "name", name))
    }

    /// Retrieves the asset with the given ISIN
    pub async fn get_by_isin(&self, isin: &str) -> Result<Asset, DatabaseError> {
        self.find_first("isin", isin)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Asset", "isin", isin))
    }

    /// Retrieves an asset by its key
    pub async fn get_by_id(&self, id: AssetId) -> Result<Asset, DatabaseError> {
        sqlx::query_as::<_, Asset>(&format!("SELECT {} FROM assets WHERE id = $1", ASSET_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Asset", "id", id))
    }

    /// Persists an asset with no symbol or ISIN
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the name is taken
    pub async fn insert(&self, name: &str, description: &str) -> Result<Asset, DatabaseError> {
        self.insert_listed(&NewAsset::unlisted(name, description)).await
    }

    /// Persists an asset together with its listing identifiers
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the name, symbol or ISIN
    /// is taken
    pub async fn insert_listed(&self, asset: &NewAsset) -> Result<Asset, DatabaseError> {
        let inserted = sqlx::query_as::<_, Asset>(&format!(
            r#"
            INSERT INTO assets (name, symbol, isin, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ASSET_COLUMNS
        ))
        .bind(&asset.name)
        .bind(&asset.symbol)
        .bind(&asset.isin)
        .bind(&asset.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    // `column` is always one of the fixed unique keys above, never caller input.
    async fn find_first(&self, column: &str, value: &str) -> Result<Option<Asset>, DatabaseError> {
        let asset = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {} FROM assets WHERE {} = $1 ORDER BY id LIMIT 1",
            ASSET_COLUMNS, column
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asset)
    }
}
