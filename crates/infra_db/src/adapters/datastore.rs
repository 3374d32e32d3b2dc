use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    Account, AccountId, Asset, AssetId, AssetValue, Datastore, Granularity, NewAsset,
    NewAssetValue, Record, RecordId, RecordType,
};

use crate::error::DatabaseError;
use crate::repositories::{
    AccountRepository, AssetRepository, AssetValueRepository, RecordRepository,
};
use crate::schema::SchemaManager;

/// PostgreSQL-backed implementation of the `Datastore` port
///
/// Every call is delegated to the matching repository. Operations beyond the
/// port (id lookups, listings, valuations) are exposed as inherent methods.
#[derive(Debug, Clone)]
pub struct PostgresDatastore {
    schema: SchemaManager,
    accounts: AccountRepository,
    assets: AssetRepository,
    asset_values: AssetValueRepository,
    records: RecordRepository,
    pool: PgPool,
}

impl PostgresDatastore {
    /// Creates a new datastore sharing the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            schema: SchemaManager::new(pool.clone()),
            accounts: AccountRepository::new(pool.clone()),
            assets: AssetRepository::new(pool.clone()),
            asset_values: AssetValueRepository::new(pool.clone()),
            records: RecordRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn schema(&self) -> &SchemaManager {
        &self.schema
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Checks that the pool can reach the database
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn get_account_by_id(&self, id: AccountId) -> Result<Account, DatabaseError> {
        debug!("Fetching account by id");
        self.accounts.get_by_id(id).await
    }

    #[instrument(skip(self), fields(asset_id = %id))]
    pub async fn get_asset_by_id(&self, id: AssetId) -> Result<Asset, DatabaseError> {
        debug!("Fetching asset by id");
        self.assets.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_asset_by_isin(&self, isin: &str) -> Result<Asset, DatabaseError> {
        debug!("Fetching asset by ISIN");
        self.assets.get_by_isin(isin).await
    }

    #[instrument(skip(self, asset), fields(name = %asset.name))]
    pub async fn insert_listed_asset(&self, asset: &NewAsset) -> Result<Asset, DatabaseError> {
        debug!(symbol = ?asset.symbol, isin = ?asset.isin, "Inserting listed asset");
        self.assets.insert_listed(asset).await
    }

    #[instrument(skip(self), fields(record_id = %id))]
    pub async fn get_record_by_id(&self, id: RecordId) -> Result<Record, DatabaseError> {
        debug!("Fetching record by id");
        self.records.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_records_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Record>, DatabaseError> {
        debug!("Listing records for account");
        self.records.list_for_account(account_id).await
    }

    #[instrument(skip(self, value), fields(asset_id = %value.asset_id, granularity = %value.granularity))]
    pub async fn insert_asset_value(
        &self,
        value: &NewAssetValue,
    ) -> Result<AssetValue, DatabaseError> {
        debug!("Inserting asset value");
        self.asset_values.insert(value).await
    }

    #[instrument(skip(self))]
    pub async fn list_asset_values(
        &self,
        asset_id: AssetId,
        base_asset_id: AssetId,
        granularity: Granularity,
    ) -> Result<Vec<AssetValue>, DatabaseError> {
        debug!("Listing asset values");
        self.asset_values.list(asset_id, base_asset_id, granularity).await
    }
}

#[async_trait]
impl Datastore for PostgresDatastore {
    type Error = DatabaseError;

    async fn create_tables(&self) -> Result<(), DatabaseError> {
        self.schema.create_tables().await
    }

    #[instrument(skip(self))]
    async fn get_asset_by_name(&self, name: &str) -> Result<Asset, DatabaseError> {
        debug!("Fetching asset by name");
        self.assets.get_by_name(name).await
    }

    #[instrument(skip(self))]
    async fn get_asset_by_symbol(&self, symbol: &str) -> Result<Asset, DatabaseError> {
        debug!("Fetching asset by symbol");
        self.assets.get_by_symbol(symbol).await
    }

    #[instrument(skip(self, description))]
    async fn insert_asset(&self, name: &str, description: &str) -> Result<Asset, DatabaseError> {
        debug!("Inserting asset");
        self.assets.insert(name, description).await
    }

    #[instrument(skip(self))]
    async fn get_account_by_name(&self, name: &str) -> Result<Account, DatabaseError> {
        debug!("Fetching account by name");
        self.accounts.get_by_name(name).await
    }

    #[instrument(skip(self))]
    async fn insert_account(&self, name: &str) -> Result<Account, DatabaseError> {
        debug!("Inserting account");
        self.accounts.insert(name).await
    }

    #[instrument(
        skip(self, account, asset),
        fields(account_id = %account.id, asset_id = %asset.id)
    )]
    async fn insert_record(
        &self,
        account: &Account,
        asset: &Asset,
        record_type: RecordType,
        created_at: DateTime<Utc>,
        quantity: i64,
    ) -> Result<Record, DatabaseError> {
        debug!(quantity, "Inserting record");
        self.records
            .insert(account, asset, record_type, created_at, quantity)
            .await
    }
}
