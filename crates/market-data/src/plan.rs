//! Load planning for NBP resources.
//!
//! Builds the list of resources the loader registers: the periodically
//! refreshed current table, plus the historical archive split into
//! consecutive three-month windows (the NBP API refuses ranges longer than
//! 93 days).

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Months, NaiveDate};

use crate::models::{LoadResource, ResourceKind, UpdatePolicy};

/// Resource id of the current table.
pub const CURRENT_RESOURCE_ID: &str = "nbp-rate-provider-current";

/// Prefix of historical resource ids.
pub const HISTORIC_RESOURCE_PREFIX: &str = "nbp-rate-provider-historic";

/// Default refresh period of the current table.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(3 * 60 * 60);

/// Length of one historical window.
const HISTORIC_WINDOW_MONTHS: u32 = 3;

/// Extension of backup files, named `<resource-id>.dat`.
const BACKUP_EXTENSION: &str = "dat";

/// First day covered by the NBP table A archive.
pub fn archive_beginning() -> NaiveDate {
    NaiveDate::from_ymd_opt(2002, 1, 1).expect("valid archive start date")
}

/// Builder for the set of resources to load.
#[derive(Clone, Debug, Default)]
pub struct LoadPlan {
    resources: Vec<LoadResource>,
    backup_dir: Option<PathBuf>,
}

impl LoadPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Historical resources with a file under `dir` are loaded from it.
    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(dir.into());
        self
    }

    /// Adds the current table, refreshed every `period`.
    pub fn with_current(mut self, period: Duration) -> Self {
        self.resources.push(LoadResource::new(
            CURRENT_RESOURCE_ID,
            ResourceKind::Current,
            UpdatePolicy::Scheduled(period),
        ));
        self
    }

    /// Adds the whole archive, from 2002-01-01 up to `today`.
    pub fn with_historic_since_beginning(self, today: NaiveDate) -> Self {
        self.with_historic_since(archive_beginning(), today)
    }

    /// Adds three-month windows covering `since..=today`.
    pub fn with_historic_since(mut self, since: NaiveDate, today: NaiveDate) -> Self {
        let mut from = since;

        while from < today {
            let Some(to) = window_end(from, today) else {
                break;
            };

            self.resources.push(LoadResource::new(
                historic_resource_id(from, to),
                ResourceKind::Historic { from, to },
                UpdatePolicy::OnStartup,
            ));

            match to.succ_opt() {
                Some(next) => from = next,
                None => break,
            }
        }

        self
    }

    pub fn resources(&self) -> &[LoadResource] {
        &self.resources
    }

    /// Finalizes the plan, attaching backup files to historical resources.
    pub fn into_resources(self) -> Vec<LoadResource> {
        let Some(dir) = self.backup_dir else {
            return self.resources;
        };

        self.resources
            .into_iter()
            .map(|resource| match resource.kind {
                ResourceKind::Historic { .. } => {
                    let path = dir.join(format!("{}.{}", resource.id, BACKUP_EXTENSION));
                    let mut resource = resource.with_backup(path.clone());
                    if path.exists() {
                        resource.policy = UpdatePolicy::Never;
                    }
                    resource
                }
                ResourceKind::Current => resource,
            })
            .collect()
    }
}

/// Id of a historical window, e.g.
/// `nbp-rate-provider-historic-2002-01-01-2002-03-31`.
pub fn historic_resource_id(from: NaiveDate, to: NaiveDate) -> String {
    format!("{}-{}-{}", HISTORIC_RESOURCE_PREFIX, from, to)
}

fn window_end(from: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let to = from
        .checked_add_months(Months::new(HISTORIC_WINDOW_MONTHS))?
        .pred_opt()?;
    Some(to.min(today))
}
