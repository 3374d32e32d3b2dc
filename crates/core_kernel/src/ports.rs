//! Storage port
//!
//! The `Datastore` trait is the seam between callers and a concrete store.
//! The PostgreSQL adapter lives in `infra_db`; callers that only need the
//! basic lookups and inserts depend on this trait instead.
//!
//! ```rust,ignore
//! async fn open_ledger<D: Datastore>(store: &D) -> Result<Account, D::Error> {
//!     match store.get_account_by_name("alice").await {
//!         Ok(account) => Ok(account),
//!         Err(_) => store.insert_account("alice").await,
//!     }
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Account, Asset, Record};
use crate::enums::RecordType;

/// Basic lookups and inserts over the finance schema
#[async_trait]
pub trait Datastore: Send + Sync + 'static {
    /// Error reported by every operation of this store
    type Error: std::error::Error + Send + Sync + 'static;

    /// (Re)creates the enum types and the entity tables
    async fn create_tables(&self) -> Result<(), Self::Error>;

    async fn get_asset_by_name(&self, name: &str) -> Result<Asset, Self::Error>;

    async fn get_asset_by_symbol(&self, symbol: &str) -> Result<Asset, Self::Error>;

    async fn insert_asset(&self, name: &str, description: &str) -> Result<Asset, Self::Error>;

    async fn get_account_by_name(&self, name: &str) -> Result<Account, Self::Error>;

    async fn insert_account(&self, name: &str) -> Result<Account, Self::Error>;

    /// Persists a ledger entry for an already-persisted account and asset
    async fn insert_record(
        &self,
        account: &Account,
        asset: &Asset,
        record_type: RecordType,
        created_at: DateTime<Utc>,
        quantity: i64,
    ) -> Result<Record, Self::Error>;
}
