//! Feed trait definitions.
//!
//! This module defines the `RateFeed` trait that every source of NBP rate
//! tables implements. The loader only talks to this trait.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{LoadResource, NbpRatesTable};

/// Source of rate tables for load resources.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use nbp_fx_market_data::{LoadResource, MarketDataError, NbpRatesTable, RateFeed};
///
/// struct StaticFeed(Vec<NbpRatesTable>);
///
/// #[async_trait]
/// impl RateFeed for StaticFeed {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn fetch(&self, _resource: &LoadResource) -> Result<Vec<NbpRatesTable>, MarketDataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait RateFeed: Send + Sync {
    /// Constant identifier used in logs, e.g. "NBP".
    fn id(&self) -> &'static str;

    /// Fetch all tables covered by `resource`.
    ///
    /// Returns [`MarketDataError::NoDataForRange`] when nothing was
    /// published for the resource's dates.
    async fn fetch(&self, resource: &LoadResource) -> Result<Vec<NbpRatesTable>, MarketDataError>;
}
