use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use nbp_fx_market_data::{
    flatten_tables, MarketDataError, NbpRatesTable, RecordValidator, ValidationReport,
};
use rust_decimal::Decimal;

use super::conversion_resolver::{normalize_code, ConversionResolver};
use super::fallback_policy::FallbackPolicy;
use super::fx_errors::FxError;
use super::fx_model::{Conversion, ConversionQuery, ExchangeRate, RateType};
use super::fx_traits::RateProviderTrait;
use super::load_gate::LoadGate;
use super::rate_store::RateStore;
use crate::constants::{BASE_CURRENCY_CODE, DEFAULT_LOAD_TIMEOUT, PROVIDER_NAME};
use crate::errors::Result;
use crate::loader::LoaderListener;

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub base_currency: String,
    pub fallback: FallbackPolicy,
    /// Bound on the wait for the first successful load
    pub load_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_currency: BASE_CURRENCY_CODE.to_string(),
            fallback: FallbackPolicy::default(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

/// NBP-backed rate provider.
///
/// Receives table batches from the loader, records them in the shared
/// [`RateStore`], and serves conversion queries once the first batch has
/// been recorded.
pub struct NbpRateProvider {
    store: Arc<RateStore>,
    resolver: ConversionResolver,
    gate: LoadGate,
    validator: RecordValidator,
    config: ProviderConfig,
}

impl Default for NbpRateProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl NbpRateProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let store = Arc::new(RateStore::new(config.base_currency.clone()));
        let resolver = ConversionResolver::new(Arc::clone(&store), config.fallback);

        Self {
            store,
            resolver,
            gate: LoadGate::new(),
            validator: RecordValidator::new(config.base_currency.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<RateStore> {
        &self.store
    }

    pub fn resolver(&self) -> &ConversionResolver {
        &self.resolver
    }

    /// Validates and records every rate in `tables`.
    pub fn add_tables(&self, tables: &[NbpRatesTable]) -> ValidationReport {
        let (accepted, report) = self.validator.filter(flatten_tables(tables));
        self.store.record_all(accepted);
        report
    }

    fn build_rate(
        &self,
        base: String,
        term: String,
        factor: Decimal,
        rate_type: RateType,
        dates: Vec<chrono::NaiveDate>,
    ) -> ExchangeRate {
        ExchangeRate {
            base_currency: base,
            term_currency: term,
            factor,
            provider: PROVIDER_NAME.to_string(),
            rate_type,
            dates,
        }
    }
}

impl LoaderListener for NbpRateProvider {
    fn new_data_loaded(&self, resource_id: &str, tables: Vec<NbpRatesTable>) {
        let report = self.add_tables(&tables);

        info!(
            "Loaded {} rates from {} ({} tables, {} rejected)",
            report.accepted,
            resource_id,
            tables.len(),
            report.rejected.len()
        );

        if report.accepted > 0 {
            self.gate.open();
        }
    }

    fn load_failed(&self, resource_id: &str, error: &MarketDataError) {
        warn!("Error during data load of {}: {}", resource_id, error);
    }
}

#[async_trait]
impl RateProviderTrait for NbpRateProvider {
    fn is_loaded(&self) -> bool {
        self.gate.is_open()
    }

    fn currencies(&self) -> Vec<String> {
        self.store.currencies()
    }

    fn entry_count(&self) -> usize {
        self.store.len()
    }

    async fn get_exchange_rate(&self, query: &ConversionQuery) -> Result<ExchangeRate> {
        let base = normalize_code(&query.base_currency)?;
        let term = normalize_code(&query.term_currency)?;
        let dates = self.resolver.candidate_dates(query.as_of);

        // Identity conversions need no data.
        if base != term {
            self.gate.wait(self.config.load_timeout).await?;
        }

        let factor = self.resolver.resolve_on_dates(&base, &term, &dates)?;
        Ok(self.build_rate(base, term, factor, RateType::Historic, dates))
    }

    async fn get_latest_exchange_rate(&self, base: &str, term: &str) -> Result<ExchangeRate> {
        let base = normalize_code(base)?;
        let term = normalize_code(term)?;

        if base != term {
            self.gate.wait(self.config.load_timeout).await?;
        }

        let factor = self.resolver.resolve_latest(&base, &term)?;
        let mut dates: Vec<_> = [&base, &term]
            .into_iter()
            .filter_map(|code| self.store.latest_date(code))
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();

        Ok(self.build_rate(base, term, factor, RateType::Latest, dates))
    }

    async fn convert(&self, amount: Decimal, query: &ConversionQuery) -> Result<Conversion> {
        let rate = self.get_exchange_rate(query).await?;
        let converted = amount.checked_mul(rate.factor).ok_or_else(|| {
            FxError::ArithmeticOverflow(format!("{} * {}", amount, rate.factor))
        })?;

        Ok(Conversion {
            amount,
            converted,
            rate,
        })
    }
}
