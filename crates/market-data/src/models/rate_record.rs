use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single `(date, currency, rate)` observation extracted from a feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    pub date: NaiveDate,
    pub code: String,
    pub rate: Decimal,
}

impl RateRecord {
    pub fn new(date: NaiveDate, code: impl Into<String>, rate: Decimal) -> Self {
        Self {
            date,
            code: code.into(),
            rate,
        }
    }
}
