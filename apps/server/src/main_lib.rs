use std::sync::Arc;

use nbp_fx_core::fx::{FallbackPolicy, NbpRateProvider, ProviderConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    /// Rate cache fed by the background loader and queried by the API.
    pub rate_provider: Arc<NbpRateProvider>,
}

pub fn init_tracing() {
    let log_format = std::env::var("NBP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider_config = ProviderConfig {
        fallback: FallbackPolicy::new(config.fallback_days),
        load_timeout: config.load_timeout,
        ..ProviderConfig::default()
    };
    tracing::info!(
        "Rate provider configured: base {}, walk-back {} days, load timeout {}s",
        provider_config.base_currency,
        config.fallback_days,
        config.load_timeout.as_secs()
    );

    Ok(Arc::new(AppState {
        rate_provider: Arc::new(NbpRateProvider::new(provider_config)),
    }))
}
