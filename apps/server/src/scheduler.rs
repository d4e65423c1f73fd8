//! Background rate loading.
//!
//! Builds the load plan from the server configuration and hands it to the
//! core loader, which refreshes the current table on its own interval.

use std::sync::Arc;

use chrono::Utc;
use nbp_fx_core::loader::{LoaderHandle, LoaderListener, LoaderService};
use nbp_fx_market_data::{LoadPlan, LoadResource, NbpProvider};
use tracing::info;

use crate::config::{Config, HistoricSince};
use crate::main_lib::AppState;

/// Resources to load for `config`, as of today (UTC).
pub fn plan_resources(config: &Config) -> Vec<LoadResource> {
    let today = Utc::now().date_naive();
    let mut plan = LoadPlan::new().with_current(config.refresh_period);

    plan = match config.historic_since {
        Some(HistoricSince::Beginning) => plan.with_historic_since_beginning(today),
        Some(HistoricSince::Date(since)) => plan.with_historic_since(since, today),
        None => plan,
    };

    if let Some(dir) = &config.backup_dir {
        plan = plan.with_backup_dir(dir.clone());
    }

    plan.into_resources()
}

/// Starts loading NBP tables into the state's rate provider.
pub fn start_rate_loader(state: &Arc<AppState>, config: &Config) -> LoaderHandle {
    let resources = plan_resources(config);
    info!(
        "Rate loader started against {} ({} resources, refresh every {} min)",
        config.api_url,
        resources.len(),
        config.refresh_period.as_secs() / 60
    );

    let feed = Arc::new(NbpProvider::with_base_url(config.api_url.clone()));
    let listener: Arc<dyn LoaderListener> = state.rate_provider.clone();
    let loader = Arc::new(LoaderService::new(feed, listener));

    loader.start(resources)
}
