use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use nbp_fx_core::constants::{PROVIDER_DESCRIPTION, PROVIDER_NAME};
use nbp_fx_core::fx::RateProviderTrait;
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatus {
    provider: &'static str,
    description: &'static str,
    /// Whether the first batch of rates has been recorded
    loaded: bool,
    currencies: Vec<String>,
    entries: usize,
}

async fn get_health_status(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let provider = &state.rate_provider;
    Json(HealthStatus {
        provider: PROVIDER_NAME,
        description: PROVIDER_DESCRIPTION,
        loaded: provider.is_loaded(),
        currencies: provider.currencies(),
        entries: provider.entry_count(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health_status))
}
