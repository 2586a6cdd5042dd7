//! Monetary amounts held as integer cents
//!
//! Fares and trip costs are persisted as `INTEGER` cents so sums stay exact.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, TransitError};

/// Non-negative amount in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Build from a cent count; negative amounts are rejected
    pub fn from_cents(cents: i64) -> Result<Self> {
        if cents < 0 {
            return Err(TransitError::InvalidMoney {
                value: cents.to_string(),
                reason: "amount must not be negative".to_string(),
            });
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse "5", "5.5", "5.50" or "5,50"; at most two fractional digits
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: &str| TransitError::InvalidMoney {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = value.trim();
        let (whole, fraction) = match trimmed.split_once(['.', ',']) {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal separator"));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected at most two decimal digits"));
        }

        let units: i64 = whole
            .parse()
            .map_err(|_| invalid("amount is out of range"))?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid("bad fraction"))?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(|| invalid("amount is out of range"))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = TransitError;

    fn from_str(s: &str) -> Result<Self> {
        Money::parse(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Seed files write fares as `4.50` (a YAML float) or `"4.50"`; both are accepted.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MoneyVisitor;

        impl<'de> Visitor<'de> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative amount such as 4.50 or \"4.50\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Money, E> {
                Money::parse(value).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Money, E> {
                i64::try_from(value)
                    .ok()
                    .and_then(|units| units.checked_mul(100))
                    .map(Money)
                    .ok_or_else(|| E::custom("amount is out of range"))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Money, E> {
                value
                    .checked_mul(100)
                    .ok_or_else(|| E::custom("amount is out of range"))
                    .and_then(|cents| Money::from_cents(cents).map_err(E::custom))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Money, E> {
                Money::parse(&format!("{:.2}", value)).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}
