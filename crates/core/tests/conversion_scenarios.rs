//! End-to-end scenarios: feed -> loader -> provider -> conversion queries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use nbp_fx_core::fx::{
    ConversionQuery, FxError, NbpRateProvider, ProviderConfig, RateProviderTrait, RateType,
};
use nbp_fx_core::loader::{LoaderListener, LoaderService};
use nbp_fx_core::Error;
use nbp_fx_market_data::{
    LoadResource, MarketDataError, NbpRate, NbpRatesTable, RateFeed, ResourceKind, UpdatePolicy,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rate(code: &str, mid: Decimal) -> NbpRate {
    NbpRate {
        currency: code.to_lowercase(),
        code: code.to_string(),
        mid,
        country: None,
        symbol: None,
    }
}

fn table(date: NaiveDate, rates: Vec<NbpRate>) -> NbpRatesTable {
    NbpRatesTable {
        table: "A".to_string(),
        no: format!("{}/A/NBP", date),
        effective_date: date,
        rates,
    }
}

/// Serves fixed tables per resource id.
struct FixtureFeed {
    current: Vec<NbpRatesTable>,
    historic: Vec<NbpRatesTable>,
}

#[async_trait]
impl RateFeed for FixtureFeed {
    fn id(&self) -> &'static str {
        "FIXTURE"
    }

    async fn fetch(&self, resource: &LoadResource) -> Result<Vec<NbpRatesTable>, MarketDataError> {
        match resource.kind {
            ResourceKind::Current => Ok(self.current.clone()),
            ResourceKind::Historic { .. } if self.historic.is_empty() => {
                Err(MarketDataError::NoDataForRange)
            }
            ResourceKind::Historic { .. } => Ok(self.historic.clone()),
        }
    }
}

fn fixture_feed() -> FixtureFeed {
    FixtureFeed {
        current: vec![table(
            ymd(2023, 12, 1),
            vec![rate("USD", dec!(3.9910)), rate("EUR", dec!(4.3494))],
        )],
        historic: vec![
            table(ymd(2023, 11, 29), vec![rate("USD", dec!(4.0150))]),
            table(
                ymd(2023, 11, 30),
                vec![rate("USD", dec!(4.0022)), rate("EUR", dec!(4.3480))],
            ),
        ],
    }
}

fn resources() -> Vec<LoadResource> {
    vec![
        LoadResource::new("current", ResourceKind::Current, UpdatePolicy::OnStartup),
        LoadResource::new(
            "historic-2023-11",
            ResourceKind::Historic {
                from: ymd(2023, 11, 1),
                to: ymd(2023, 11, 30),
            },
            UpdatePolicy::OnStartup,
        ),
    ]
}

async fn loaded_provider() -> Arc<NbpRateProvider> {
    let provider = Arc::new(NbpRateProvider::default());
    let loader = Arc::new(LoaderService::new(
        Arc::new(fixture_feed()),
        provider.clone() as Arc<dyn LoaderListener>,
    ));

    let mut handle = loader.start(resources());
    let summary = handle.wait_startup().await;
    assert_eq!(summary.loaded, 2);
    handle.shutdown();

    provider
}

#[tokio::test]
async fn test_pln_usd_eur_on_published_day() {
    let provider = loaded_provider().await;
    let day = ymd(2023, 12, 1);

    let usd_pln = provider
        .get_exchange_rate(&ConversionQuery::new("USD", "PLN").on(day))
        .await
        .unwrap();
    assert_eq!(usd_pln.factor, dec!(3.9910));

    let pln_usd = provider
        .get_exchange_rate(&ConversionQuery::new("PLN", "USD").on(day))
        .await
        .unwrap();
    assert!((pln_usd.factor - dec!(0.2505637684790779)).abs() < dec!(0.0000000000000001));

    let eur_usd = provider
        .get_exchange_rate(&ConversionQuery::new("EUR", "USD").on(day))
        .await
        .unwrap();
    assert!((eur_usd.factor - dec!(1.08980205462290)).abs() < dec!(0.00000000000001));
}

#[tokio::test]
async fn test_weekend_query_walks_back_to_friday() {
    let provider = loaded_provider().await;

    // 2023-12-03 is a Sunday; the last table is Friday 2023-12-01.
    let rate = provider
        .get_exchange_rate(&ConversionQuery::new("USD", "PLN").on(ymd(2023, 12, 3)))
        .await
        .unwrap();

    assert_eq!(rate.factor, dec!(3.9910));
    assert_eq!(rate.rate_type, RateType::Historic);
    assert_eq!(rate.dates[0], ymd(2023, 12, 3));
}

#[tokio::test]
async fn test_historic_and_latest_coexist() {
    let provider = loaded_provider().await;

    let historic = provider
        .get_exchange_rate(&ConversionQuery::new("USD", "PLN").on(ymd(2023, 11, 29)))
        .await
        .unwrap();
    assert_eq!(historic.factor, dec!(4.0150));

    let latest = provider.get_latest_exchange_rate("USD", "PLN").await.unwrap();
    assert_eq!(latest.factor, dec!(3.9910));
    assert_eq!(latest.dates, vec![ymd(2023, 12, 1)]);

    assert_eq!(provider.entry_count(), 5);
    assert_eq!(
        provider.currencies(),
        vec!["EUR".to_string(), "USD".to_string()]
    );
}

#[tokio::test]
async fn test_unknown_currency_is_unavailable() {
    let provider = loaded_provider().await;

    let err = provider
        .get_exchange_rate(&ConversionQuery::new("CHF", "PLN").on(ymd(2023, 12, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Fx(FxError::RateUnavailable { ref currency }) if currency == "CHF"));
}

#[tokio::test]
async fn test_empty_historic_range_still_loads_current() {
    let provider = Arc::new(NbpRateProvider::default());
    let feed = FixtureFeed {
        historic: vec![],
        ..fixture_feed()
    };
    let loader = Arc::new(LoaderService::new(
        Arc::new(feed),
        provider.clone() as Arc<dyn LoaderListener>,
    ));

    let summary = loader.load_all(&resources()).await;

    assert_eq!(summary.loaded, 1);
    assert_eq!(summary.empty, 1);
    assert_eq!(summary.failed, 0);
    assert!(provider.is_loaded());
}

#[tokio::test(start_paused = true)]
async fn test_query_times_out_without_data() {
    let provider = NbpRateProvider::new(ProviderConfig {
        load_timeout: Duration::from_secs(30),
        ..ProviderConfig::default()
    });

    let err = provider
        .get_exchange_rate(&ConversionQuery::new("USD", "PLN").on(ymd(2023, 12, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Fx(FxError::DataNotYetLoaded(_))));
}

#[tokio::test(start_paused = true)]
async fn test_waiting_query_completes_when_data_arrives() {
    let provider = Arc::new(NbpRateProvider::default());

    let waiting = {
        let provider = Arc::clone(&provider);
        tokio::spawn(async move {
            provider
                .get_exchange_rate(&ConversionQuery::new("PLN", "EUR").on(ymd(2023, 12, 1)))
                .await
        })
    };

    tokio::time::sleep(Duration::from_secs(5)).await;
    provider.new_data_loaded("late", fixture_feed().current);

    let rate = waiting.await.unwrap().unwrap();
    assert!(rate.factor > Decimal::ZERO);
    assert_eq!(rate.base_currency, "PLN");
}
