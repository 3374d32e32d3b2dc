//! Pre-built Test Fixtures
//!
//! Names are suffixed with a random token so tests sharing one database do
//! not collide on the unique indexes.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::NewAsset;
use uuid::Uuid;

/// Fixture for unique entity names
pub struct NameFixtures;

impl NameFixtures {
    /// Appends a short random token to `base`
    pub fn unique(base: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        format!("{}-{}", base, &token[..12])
    }

    /// A unique account name
    pub fn account() -> String {
        Self::unique("account")
    }

    /// A unique asset name
    pub fn asset() -> String {
        Self::unique("asset")
    }

    /// A unique ticker-like symbol
    pub fn symbol() -> String {
        let token = Uuid::new_v4().simple().to_string().to_uppercase();
        format!("T{}", &token[..8])
    }

    /// A unique twelve-character ISIN-shaped code
    pub fn isin() -> String {
        let token = Uuid::new_v4().simple().to_string().to_uppercase();
        format!("US{}", &token[..10])
    }
}

/// Fixture for asset test data
pub struct AssetFixtures;

impl AssetFixtures {
    /// An Amazon-like listed equity with unique keys
    pub fn listed_equity() -> NewAsset {
        NewAsset::unlisted(NameFixtures::unique("Amazon"), "Amazon.com, Inc. common stock")
            .with_symbol(NameFixtures::symbol())
            .with_isin(NameFixtures::isin())
    }

    /// A quote currency with a unique symbol
    pub fn quote_currency() -> NewAsset {
        NewAsset::unlisted(NameFixtures::unique("US Dollar"), "Quote currency")
            .with_symbol(NameFixtures::symbol())
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Market open on a fixed trading day
    pub fn trading_day_open() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 14, 30, 0).unwrap()
    }

    /// A fixed deposit timestamp
    pub fn deposit_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()
    }
}
