//! Core Kernel - Foundational types for the finance tracker
//!
//! This crate provides the building blocks shared by the persistence layer
//! and its callers:
//! - Strongly-typed row identifiers
//! - Closed string enumerations with validated parsing
//! - Entity definitions mapped onto the relational schema
//! - The `Datastore` port implemented by storage adapters

pub mod identifiers;
pub mod enums;
pub mod entities;
pub mod error;
pub mod ports;

pub use identifiers::{AccountId, AssetId, AssetValueId, RecordId};
pub use enums::{AccountType, Granularity, RecordType};
pub use entities::{Account, Asset, AssetValue, NewAsset, NewAssetValue, Record};
pub use error::CoreError;
pub use ports::Datastore;
