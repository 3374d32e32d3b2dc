//! Closed string enumerations
//!
//! Each enumeration stores as its literal tag. `Granularity` and `RecordType`
//! map onto native Postgres enum types of the same name; `AccountType` has no
//! column that uses it yet and only supports text round-trips.
//!
//! The enum types are bound as text and cast in SQL (`$1::record_type`), and
//! read back either as text or as the native type. No type OID is resolved on
//! the client, so recreating the types does not invalidate pooled
//! connections.
//!
//! Parsing is strict: a tag outside the closed set is a
//! [`CoreError::InvalidEnumValue`], both through `FromStr` and when sqlx
//! decodes a column.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::TypeInfo;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $sql_type:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $name {
            /// Name of the enumeration in the store
            pub const SQL_TYPE: &'static str = $sql_type;

            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the literal tag stored for this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok($name::$variant),)+
                    _ => Err(CoreError::invalid_enum_value($sql_type, s)),
                }
            }
        }
    };
}

macro_rules! impl_pg_enum {
    ($name:ident) => {
        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <&str as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <&str as sqlx::Type<Postgres>>::compatible(ty) || ty.name() == $name::SQL_TYPE
            }
        }

        impl<'q> sqlx::Encode<'q, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
                <&str as sqlx::Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> sqlx::Decode<'r, Postgres> for $name {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let tag = <&str as sqlx::Decode<'r, Postgres>>::decode(value)?;
                Ok(tag.parse::<$name>()?)
            }
        }
    };
}

string_enum! {
    /// Kind of account a ledger belongs to
    ///
    /// Not attached to `Account` yet.
    pub enum AccountType as "account_type" {
        Checking => "checking",
        Savings => "savings",
        Investment => "investment",
        CreditCard => "credit_card",
        Virtual => "virtual",
    }
}

string_enum! {
    /// Bucket width of an asset valuation sample
    pub enum Granularity as "granularity" {
        OneSecond => "1sec",
        OneMinute => "1min",
        FiveMinutes => "5min",
        OneHour => "1hour",
        OneDay => "1day",
        OneWeek => "1week",
        OneMonth => "1month",
        OneYear => "1year",
    }
}

string_enum! {
    /// Kind of ledger entry
    pub enum RecordType as "record_type" {
        Deposit => "deposit",
        Withdraw => "withdraw",
        BalanceAdjustment => "balance_adjustment",
    }
}

impl_pg_enum!(Granularity);
impl_pg_enum!(RecordType);

impl Granularity {
    /// Nominal bucket width
    ///
    /// Months and years vary in length and return `None`.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Granularity::OneSecond => Some(Duration::seconds(1)),
            Granularity::OneMinute => Some(Duration::minutes(1)),
            Granularity::FiveMinutes => Some(Duration::minutes(5)),
            Granularity::OneHour => Some(Duration::hours(1)),
            Granularity::OneDay => Some(Duration::days(1)),
            Granularity::OneWeek => Some(Duration::weeks(1)),
            Granularity::OneMonth | Granularity::OneYear => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_match_store_labels() {
        assert_eq!(Granularity::OneSecond.as_str(), "1sec");
        assert_eq!(Granularity::OneYear.as_str(), "1year");
        assert_eq!(RecordType::BalanceAdjustment.as_str(), "balance_adjustment");
        assert_eq!(AccountType::CreditCard.as_str(), "credit_card");
    }

    #[test]
    fn test_all_lists_every_variant_once() {
        assert_eq!(AccountType::ALL.len(), 5);
        assert_eq!(Granularity::ALL.len(), 8);
        assert_eq!(RecordType::ALL.len(), 3);
        assert_eq!(Granularity::ALL[0], Granularity::OneSecond);
        assert_eq!(Granularity::ALL[7], Granularity::OneYear);
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let err = "2min".parse::<Granularity>().unwrap_err();
        assert_eq!(err, CoreError::invalid_enum_value("granularity", "2min"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("DEPOSIT".parse::<RecordType>().is_err());
        assert!(" deposit".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_sql_type_names() {
        assert_eq!(Granularity::SQL_TYPE, "granularity");
        assert_eq!(RecordType::SQL_TYPE, "record_type");
    }

    #[test]
    fn test_granularity_duration() {
        assert_eq!(Granularity::FiveMinutes.duration(), Some(Duration::seconds(300)));
        assert_eq!(Granularity::OneWeek.duration(), Some(Duration::days(7)));
        assert_eq!(Granularity::OneMonth.duration(), None);
    }

    #[test]
    fn test_store_enums_bind_as_text() {
        let text = <String as sqlx::Type<Postgres>>::type_info();
        assert_eq!(<RecordType as sqlx::Type<Postgres>>::type_info(), text);
        assert_eq!(<Granularity as sqlx::Type<Postgres>>::type_info(), text);
    }

    #[test]
    fn test_store_enums_decode_from_native_type_or_text() {
        let native = PgTypeInfo::with_name("record_type");
        assert!(<RecordType as sqlx::Type<Postgres>>::compatible(&native));
        assert!(<RecordType as sqlx::Type<Postgres>>::compatible(
            &<String as sqlx::Type<Postgres>>::type_info()
        ));
        assert!(!<Granularity as sqlx::Type<Postgres>>::compatible(&native));
        assert!(!<RecordType as sqlx::Type<Postgres>>::compatible(
            &<i64 as sqlx::Type<Postgres>>::type_info()
        ));
    }
}
