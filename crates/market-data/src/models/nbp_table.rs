use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rate_record::RateRecord;
use crate::errors::MarketDataError;

/// A single NBP rate table, as published for one effective date.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NbpRatesTable {
    /// Table type ("A" for average mid-rates)
    pub table: String,

    /// Publication number, e.g. "233/A/NBP/2023"
    pub no: String,

    /// Date the rates in this table apply to
    pub effective_date: NaiveDate,

    /// Mid-rates published in this table
    pub rates: Vec<NbpRate>,
}

/// One currency entry of an NBP table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NbpRate {
    /// Currency name in Polish, e.g. "dolar amerykański"
    pub currency: String,

    /// ISO 4217 code
    pub code: String,

    /// PLN per 1 unit of `code`
    pub mid: Decimal,

    /// Only present in archival tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Only present in archival tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl NbpRatesTable {
    /// Flattens the table into `(date, code, rate)` triples.
    pub fn records(&self) -> impl Iterator<Item = RateRecord> + '_ {
        self.rates
            .iter()
            .map(move |rate| RateRecord::new(self.effective_date, rate.code.clone(), rate.mid))
    }
}

/// Decodes an NBP JSON payload (an array of tables).
pub fn parse_tables(resource: &str, payload: &[u8]) -> Result<Vec<NbpRatesTable>, MarketDataError> {
    serde_json::from_slice(payload).map_err(|e| MarketDataError::MalformedPayload {
        resource: resource.to_string(),
        message: e.to_string(),
    })
}

/// Flattens a batch of tables into rate triples, in table order.
pub fn flatten_tables(tables: &[NbpRatesTable]) -> Vec<RateRecord> {
    tables.iter().flat_map(|table| table.records()).collect()
}
