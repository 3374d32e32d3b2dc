//! Custom Test Assertions
//!
//! Assertion helpers that give more meaningful failure messages than a bare
//! `matches!`.

use core_kernel::{Account, Asset};
use infra_db::DatabaseError;

/// Asserts that a lookup failed with `NotFound` and returns the message
pub fn assert_not_found<T: std::fmt::Debug>(result: Result<T, DatabaseError>) -> String {
    match result {
        Err(DatabaseError::NotFound(msg)) => msg,
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

/// Asserts that an insert failed on a unique index
pub fn assert_duplicate<T: std::fmt::Debug>(result: Result<T, DatabaseError>) {
    match result {
        Err(err @ DatabaseError::DuplicateEntry(_)) => assert!(err.is_constraint_violation()),
        other => panic!("Expected DuplicateEntry, got {:?}", other),
    }
}

/// Asserts that an insert failed on a foreign key
pub fn assert_foreign_key_violation<T: std::fmt::Debug>(result: Result<T, DatabaseError>) {
    match result {
        Err(DatabaseError::ForeignKeyViolation(_)) => {}
        other => panic!("Expected ForeignKeyViolation, got {:?}", other),
    }
}

/// Asserts that an asset was assigned a key and stores the expected fields
pub fn assert_asset_persisted(asset: &Asset, name: &str, description: &str) {
    assert!(asset.id.value() > 0, "Asset {:?} has no assigned id", asset);
    assert_eq!(asset.name, name, "Asset name mismatch");
    assert_eq!(asset.description, description, "Asset description mismatch");
}

/// Asserts that an account was assigned a key and stores the expected name
pub fn assert_account_persisted(account: &Account, name: &str) {
    assert!(account.id.value() > 0, "Account {:?} has no assigned id", account);
    assert_eq!(account.name, name, "Account name mismatch");
}
