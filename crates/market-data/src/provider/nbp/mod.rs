//! NBP (Narodowy Bank Polski) table A provider.
//!
//! Fetches average mid-rates from the public NBP web API:
//! - `GET {base}/exchangerates/tables/A/` - latest published table
//! - `GET {base}/exchangerates/tables/A/{from}/{to}/` - tables in a date range
//!
//! The API answers 404 when a range contains no publication (weekends,
//! holidays), which is surfaced as [`MarketDataError::NoDataForRange`].

use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{parse_tables, LoadResource, NbpRatesTable, ResourceKind};
use crate::provider::RateFeed;

/// Provider ID constant
const PROVIDER_ID: &str = "NBP";

/// Public NBP API root
pub const DEFAULT_BASE_URL: &str = "https://api.nbp.pl/api";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// NBP table A provider.
///
/// # Example
///
/// ```ignore
/// use nbp_fx_market_data::provider::nbp::NbpProvider;
///
/// let provider = NbpProvider::new();
/// ```
pub struct NbpProvider {
    client: Client,
    base_url: String,
}

impl Default for NbpProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl NbpProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider against another API root (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL serving the tables of `kind`.
    pub fn resource_url(&self, kind: &ResourceKind) -> String {
        match kind {
            ResourceKind::Current => format!("{}/exchangerates/tables/A/", self.base_url),
            ResourceKind::Historic { from, to } => format!(
                "{}/exchangerates/tables/A/{}/{}/",
                self.base_url, from, to
            ),
        }
    }

    fn map_request_error(e: reqwest::Error) -> MarketDataError {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl RateFeed for NbpProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, resource: &LoadResource) -> Result<Vec<NbpRatesTable>, MarketDataError> {
        let url = self.resource_url(&resource.kind);
        debug!("Fetching {} from {}", resource.id, url);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::NoDataForRange);
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} for {}", status, url),
            });
        }

        let payload = response.bytes().await.map_err(Self::map_request_error)?;
        parse_tables(&resource.id, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_provider_id() {
        let provider = NbpProvider::new();
        assert_eq!(provider.id(), "NBP");
    }

    #[test]
    fn test_current_url() {
        let provider = NbpProvider::new();
        assert_eq!(
            provider.resource_url(&ResourceKind::Current),
            "https://api.nbp.pl/api/exchangerates/tables/A/"
        );
    }

    #[test]
    fn test_historic_url() {
        let provider = NbpProvider::with_base_url("http://localhost:9000/api/");
        let kind = ResourceKind::Historic {
            from: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2023, 3, 31).unwrap(),
        };
        assert_eq!(
            provider.resource_url(&kind),
            "http://localhost:9000/api/exchangerates/tables/A/2023-01-01/2023-03-31/"
        );
    }
}
