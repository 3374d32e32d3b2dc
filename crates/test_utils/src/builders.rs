//! Test Data Builders
//!
//! Builders that let tests set only the fields they care about.

use chrono::{DateTime, Utc};
use core_kernel::{AssetId, Granularity, NewAssetValue};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for valuation samples
pub struct NewAssetValueBuilder {
    value: NewAssetValue,
}

impl NewAssetValueBuilder {
    /// A daily sample of `asset_id` quoted in `base_asset_id`
    pub fn new(asset_id: AssetId, base_asset_id: AssetId) -> Self {
        Self {
            value: NewAssetValue {
                asset_id,
                base_asset_id,
                evaluated_at: None,
                granularity: Granularity::OneDay,
                open: dec!(178.2500),
                high: dec!(181.1000),
                low: dec!(177.0500),
                close: dec!(180.7500),
                volume: 42_000_000,
            },
        }
    }

    pub fn evaluated_at(mut self, at: DateTime<Utc>) -> Self {
        self.value.evaluated_at = Some(at);
        self
    }

    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.value.granularity = granularity;
        self
    }

    /// Sets open, high, low and close in that order
    pub fn ohlc(mut self, open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Self {
        self.value.open = open;
        self.value.high = high;
        self.value.low = low;
        self.value.close = close;
        self
    }

    pub fn volume(mut self, volume: i64) -> Self {
        self.value.volume = volume;
        self
    }

    pub fn build(self) -> NewAssetValue {
        self.value
    }
}
