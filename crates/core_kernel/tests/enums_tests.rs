//! Round-trip and rejection properties of the closed enumerations

use core_kernel::{AccountType, CoreError, Granularity, RecordType};
use proptest::prelude::*;

#[test]
fn test_every_account_type_round_trips() {
    for variant in AccountType::ALL {
        assert_eq!(variant.as_str().parse::<AccountType>(), Ok(*variant));
    }
}

#[test]
fn test_every_granularity_round_trips() {
    for variant in Granularity::ALL {
        assert_eq!(variant.to_string().parse::<Granularity>(), Ok(*variant));
    }
}

#[test]
fn test_every_record_type_round_trips() {
    for variant in RecordType::ALL {
        assert_eq!(variant.to_string().parse::<RecordType>(), Ok(*variant));
    }
}

#[test]
fn test_serde_uses_store_tags() {
    let json = serde_json::to_string(&Granularity::FiveMinutes).unwrap();
    assert_eq!(json, "\"5min\"");

    let parsed: RecordType = serde_json::from_str("\"withdraw\"").unwrap();
    assert_eq!(parsed, RecordType::Withdraw);

    assert!(serde_json::from_str::<AccountType>("\"brokerage\"").is_err());
}

proptest! {
    #[test]
    fn prop_unknown_granularity_is_rejected(tag in "[a-z0-9_]{0,12}") {
        prop_assume!(!Granularity::ALL.iter().any(|g| g.as_str() == tag));
        let result = tag.parse::<Granularity>();
        prop_assert!(
            matches!(result, Err(CoreError::InvalidEnumValue { kind: "granularity", .. })),
            "unexpected result: {:?}",
            result
        );
    }

    #[test]
    fn prop_unknown_record_type_is_rejected(tag in "\\PC{0,20}") {
        prop_assume!(!RecordType::ALL.iter().any(|r| r.as_str() == tag));
        prop_assert!(tag.parse::<RecordType>().is_err());
    }

    #[test]
    fn prop_account_type_round_trips(index in 0..AccountType::ALL.len()) {
        let variant = AccountType::ALL[index];
        prop_assert_eq!(variant.as_str().parse::<AccountType>(), Ok(variant));
    }
}
