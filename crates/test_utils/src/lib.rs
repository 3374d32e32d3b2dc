//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! finance tracker test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `database`: Postgres container management
//! - `assertions`: Assertion helpers for entities and database errors
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
