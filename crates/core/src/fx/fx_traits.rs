use async_trait::async_trait;
use rust_decimal::Decimal;

use super::fx_model::{Conversion, ConversionQuery, ExchangeRate};
use crate::errors::Result;

/// Trait defining the contract for rate provider operations.
///
/// Query methods wait for the first successful load (bounded by the
/// provider's load timeout) before resolving.
#[async_trait]
pub trait RateProviderTrait: Send + Sync {
    /// Whether at least one batch of rates has been recorded.
    fn is_loaded(&self) -> bool;

    /// Currencies with at least one recorded rate.
    fn currencies(&self) -> Vec<String>;

    /// Number of `(date, currency)` entries held.
    fn entry_count(&self) -> usize;

    async fn get_exchange_rate(&self, query: &ConversionQuery) -> Result<ExchangeRate>;

    async fn get_latest_exchange_rate(&self, base: &str, term: &str) -> Result<ExchangeRate>;

    /// Converts `amount` of the query's base currency into its term currency.
    ///
    /// Fails with `ArithmeticOverflow` when the product leaves the decimal range.
    async fn convert(&self, amount: Decimal, query: &ConversionQuery) -> Result<Conversion>;
}
