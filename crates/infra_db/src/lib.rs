//! Infrastructure Database Layer
//!
//! This crate persists the finance tracker's entities in PostgreSQL using
//! SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Each entity has a repository of
//! single-row lookups and inserts; [`SchemaManager`] owns the DDL, and
//! [`PostgresDatastore`] bundles both behind the `core_kernel::Datastore` port.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PostgresDatastore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/finance")).await?;
//! let store = PostgresDatastore::new(pool);
//! store.create_tables().await?;
//! let asset = store.insert_asset("AMZN-co", "desc").await?;
//! ```

pub mod pool;
pub mod error;
pub mod schema;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use schema::{SchemaManager, SchemaStep, TableDefinition};
pub use adapters::PostgresDatastore;
