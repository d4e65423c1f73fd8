use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a resolved rate was selected.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateType {
    /// Looked up for a requested date, walking back over missing days.
    Historic,
    /// Latest known publication of each leg.
    Latest,
}

/// A conversion request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionQuery {
    pub base_currency: String,
    pub term_currency: String,
    /// Defaults to today when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

impl ConversionQuery {
    pub fn new(base_currency: impl Into<String>, term_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
            term_currency: term_currency.into(),
            as_of: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }
}

/// A resolved conversion factor: 1 `base_currency` = `factor` `term_currency`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub base_currency: String,
    pub term_currency: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub factor: Decimal,
    pub provider: String,
    pub rate_type: RateType,
    /// Candidate dates the factor was looked up on, most preferred first.
    pub dates: Vec<NaiveDate>,
}

/// An amount converted at a resolved rate.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    #[serde(serialize_with = "serialize_decimal")]
    pub amount: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    pub converted: Decimal,
    pub rate: ExchangeRate,
}

/// Serializes a decimal as a string without float rounding.
pub fn serialize_decimal<S>(decimal: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&decimal.normalize().to_string())
}
