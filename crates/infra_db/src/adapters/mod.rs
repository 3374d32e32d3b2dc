//! Port Adapters
//!
//! Connects the `core_kernel::Datastore` port to the PostgreSQL
//! repositories.
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_kernel::Datastore;
//! use infra_db::adapters::PostgresDatastore;
//!
//! let store = PostgresDatastore::new(pool);
//! let asset = store.get_asset_by_symbol("AMZN").await?;
//! ```

pub mod datastore;

pub use datastore::PostgresDatastore;
