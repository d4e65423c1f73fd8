//! Local backup payloads.
//!
//! A backup is a saved NBP JSON response stored as `<resource-id>.dat`.

use log::debug;

use crate::errors::MarketDataError;
use crate::models::{parse_tables, LoadResource, NbpRatesTable};

/// Reads and decodes the backup file attached to `resource`.
pub async fn read_backup(resource: &LoadResource) -> Result<Vec<NbpRatesTable>, MarketDataError> {
    let path = resource
        .backup
        .as_ref()
        .ok_or_else(|| MarketDataError::BackupUnavailable {
            resource: resource.id.clone(),
            message: "no backup configured".to_string(),
        })?;

    debug!("Reading backup for {} from {}", resource.id, path.display());

    let payload = tokio::fs::read(path)
        .await
        .map_err(|e| MarketDataError::BackupUnavailable {
            resource: resource.id.clone(),
            message: e.to_string(),
        })?;

    parse_tables(&resource.id, &payload)
}
