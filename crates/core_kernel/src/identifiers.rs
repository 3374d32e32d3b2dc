//! Strongly-typed identifiers for persisted entities
//!
//! Every table uses a `BIGSERIAL` surrogate key. Wrapping the raw `i64` in a
//! newtype per entity keeps an asset id from being passed where an account id
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a store-assigned key
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying key
            pub fn value(&self) -> i64 {
                self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(raw.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(AccountId, "ACC");
define_id!(AssetId, "AST");
define_id!(AssetValueId, "VAL");
define_id!(RecordId, "REC");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_display() {
        let id = AccountId::new(42);
        assert_eq!(id.to_string(), "ACC-42");
    }

    #[test]
    fn test_id_parsing() {
        let original = AssetId::new(7);
        let parsed: AssetId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: AssetId = "7".parse().unwrap();
        assert_eq!(bare, original);
    }

    #[test]
    fn test_i64_conversion() {
        let id = RecordId::from(99);
        let back: i64 = id.into();
        assert_eq!(back, 99);
    }
}
