//! Entity definitions
//!
//! These structs are transient copies of rows. They are only ever produced by
//! an insert or a lookup and are never written back.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::enums::{Granularity, RecordType};
use crate::error::CoreError;
use crate::identifiers::{AccountId, AssetId, AssetValueId, RecordId};

/// Total digits of a stored price
pub const PRICE_PRECISION: u32 = 10;

/// Fractional digits of a stored price
pub const PRICE_SCALE: u32 = 4;

/// A named ledger account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
}

/// A tradable asset or currency
///
/// `symbol` (e.g. AMZN, NVDA) and `isin` (International Securities
/// Identification Number) are unique when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub symbol: Option<String>,
    pub isin: Option<String>,
    pub description: String,
}

/// One OHLCV sample of `asset_id` quoted in `base_asset_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AssetValue {
    pub id: AssetValueId,
    pub asset_id: AssetId,
    pub base_asset_id: AssetId,
    pub evaluated_at: DateTime<Utc>,
    pub granularity: Granularity,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
}

/// A single ledger entry moving `quantity` of an asset in or out of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Record {
    pub id: RecordId,
    pub account_id: AccountId,
    pub asset_id: AssetId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub created_at: DateTime<Utc>,
    pub quantity: i64,
}

/// Data for creating an asset with its listing identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    pub symbol: Option<String>,
    pub isin: Option<String>,
    pub description: String,
}

impl NewAsset {
    /// An unlisted asset, with neither symbol nor ISIN
    pub fn unlisted(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }
}

/// Data for recording an asset valuation
///
/// `evaluated_at` falls back to the insertion time when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssetValue {
    pub asset_id: AssetId,
    pub base_asset_id: AssetId,
    pub evaluated_at: Option<DateTime<Utc>>,
    pub granularity: Granularity,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
}

impl NewAssetValue {
    /// Checks that every price fits a `NUMERIC(10,4)` column
    ///
    /// Extra fractional digits are rounded by the store; only the integer
    /// part can overflow.
    pub fn validate(&self) -> Result<(), CoreError> {
        let limit = Decimal::from(10_i64.pow(PRICE_PRECISION - PRICE_SCALE));
        for (field, price) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            let stored =
                price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
            if stored.abs() >= limit {
                return Err(CoreError::validation(format!(
                    "{} price {} exceeds NUMERIC({},{})",
                    field, price, PRICE_PRECISION, PRICE_SCALE
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_value() -> NewAssetValue {
        NewAssetValue {
            asset_id: AssetId::new(1),
            base_asset_id: AssetId::new(2),
            evaluated_at: None,
            granularity: Granularity::OneDay,
            open: dec!(101.5),
            high: dec!(103.25),
            low: dec!(100.0001),
            close: dec!(102.75),
            volume: 12_000,
        }
    }

    #[test]
    fn test_new_asset_unlisted_has_no_identifiers() {
        let asset = NewAsset::unlisted("AMZN-co", "desc");
        assert_eq!(asset.name, "AMZN-co");
        assert_eq!(asset.description, "desc");
        assert!(asset.symbol.is_none());
        assert!(asset.isin.is_none());
    }

    #[test]
    fn test_new_asset_builder() {
        let asset = NewAsset::unlisted("Amazon", "")
            .with_symbol("AMZN")
            .with_isin("US0231351067");
        assert_eq!(asset.symbol.as_deref(), Some("AMZN"));
        assert_eq!(asset.isin.as_deref(), Some("US0231351067"));
    }

    #[test]
    fn test_validate_accepts_prices_in_range() {
        assert!(sample_value().validate().is_ok());

        let mut edge = sample_value();
        edge.high = dec!(999999.9999);
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_price() {
        let mut value = sample_value();
        value.close = dec!(1000000);
        let err = value.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.starts_with("close")));
    }

    #[test]
    fn test_validate_rejects_price_that_rounds_over_limit() {
        let mut value = sample_value();
        value.low = dec!(-999999.99995);
        assert!(value.validate().is_err());
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = Record {
            id: RecordId::new(1),
            account_id: AccountId::new(2),
            asset_id: AssetId::new(3),
            record_type: RecordType::Deposit,
            created_at: Utc::now(),
            quantity: 100,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "deposit");
        assert_eq!(json["account_id"], 2);
    }
}
