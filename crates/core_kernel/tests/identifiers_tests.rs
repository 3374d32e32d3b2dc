//! Unit tests for the Identifiers module
//!
//! Tests cover identifier construction, parsing, conversion and
//! display formatting.

use core_kernel::{AccountId, AssetId, AssetValueId, RecordId};

mod account_id_tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(AccountId::prefix(), "ACC");
    }

    #[test]
    fn test_display_format() {
        assert_eq!(AccountId::new(17).to_string(), "ACC-17");
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = AccountId::new(17);
        let parsed: AccountId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_rejects_foreign_prefix() {
        assert!("AST-17".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_json_serialization_is_transparent() {
        let id = AccountId::new(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");
        let deserialized: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

mod ordering_tests {
    use super::*;

    #[test]
    fn test_ids_order_by_key() {
        assert!(AssetId::new(1) < AssetId::new(2));
        assert!(RecordId::new(10) > RecordId::new(9));
    }

    #[test]
    fn test_prefixes_are_distinct() {
        let prefixes = [
            AccountId::prefix(),
            AssetId::prefix(),
            AssetValueId::prefix(),
            RecordId::prefix(),
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in &prefixes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
