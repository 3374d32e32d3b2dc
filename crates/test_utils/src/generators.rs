//! Property-Based Test Generators
//!
//! Proptest strategies for the closed enumerations and for strings that are
//! guaranteed to fall outside them.

use core_kernel::{AccountType, Granularity, RecordType};
use proptest::prelude::*;

/// Strategy for any valid Granularity
pub fn granularity_strategy() -> impl Strategy<Value = Granularity> {
    proptest::sample::select(Granularity::ALL.to_vec())
}

/// Strategy for any valid RecordType
pub fn record_type_strategy() -> impl Strategy<Value = RecordType> {
    proptest::sample::select(RecordType::ALL.to_vec())
}

/// Strategy for any valid AccountType
pub fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    proptest::sample::select(AccountType::ALL.to_vec())
}

/// Strategy for strings that are not a tag of any enumeration
pub fn unknown_tag_strategy() -> impl Strategy<Value = String> {
    "\\PC{0,24}".prop_filter("must not be a known tag", |tag| {
        !Granularity::ALL.iter().any(|g| g.as_str() == tag)
            && !RecordType::ALL.iter().any(|r| r.as_str() == tag)
            && !AccountType::ALL.iter().any(|a| a.as_str() == tag)
    })
}
