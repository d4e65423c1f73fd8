//! FX module - rate store, conversion resolver and the NBP rate provider.

mod conversion_resolver;
mod fallback_policy;
mod fx_errors;
pub mod fx_model;
mod fx_traits;
mod load_gate;
mod rate_provider;
mod rate_store;

pub use conversion_resolver::{divide, normalize_code, ConversionResolver};
pub use fallback_policy::FallbackPolicy;
pub use fx_errors::FxError;
pub use fx_model::{Conversion, ConversionQuery, ExchangeRate, RateType};
pub use fx_traits::RateProviderTrait;
pub use load_gate::LoadGate;
pub use rate_provider::{NbpRateProvider, ProviderConfig};
pub use rate_store::RateStore;
