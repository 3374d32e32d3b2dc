//! Repository implementations for the finance entities
//!
//! Each repository wraps the connection pool and issues one statement per
//! call. Lookups branch on an explicit "no row" from `fetch_optional`;
//! inserts return the row as stored, including the assigned key and any
//! column defaults.

pub mod account;
pub mod asset;
pub mod asset_value;
pub mod record;

pub use account::AccountRepository;
pub use asset::AssetRepository;
pub use asset_value::AssetValueRepository;
pub use record::RecordRepository;
