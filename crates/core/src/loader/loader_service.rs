use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use nbp_fx_market_data::{
    read_backup, LoadResource, MarketDataError, NbpRatesTable, RateFeed, UpdatePolicy,
};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::loader_traits::LoaderListener;
use crate::constants::DEFAULT_STARTUP_CONCURRENCY;
use crate::errors::Result;

/// Shortest accepted refresh period for scheduled resources.
const MIN_REFRESH_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub struct LoaderConfig {
    /// Maximum one-off resources loading at the same time
    pub startup_concurrency: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            startup_concurrency: DEFAULT_STARTUP_CONCURRENCY,
        }
    }
}

/// Result of loading a single resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Tables were delivered to the listener.
    Loaded { tables: usize },
    /// Nothing was published for the resource's dates.
    Empty,
}

/// Counts of resource outcomes for a batch of loads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub empty: usize,
    pub failed: usize,
}

impl LoadSummary {
    fn record(&mut self, result: &Result<LoadOutcome>) {
        match result {
            Ok(LoadOutcome::Loaded { .. }) => self.loaded += 1,
            Ok(LoadOutcome::Empty) => self.empty += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Handle on the background tasks started by [`LoaderService::start`].
pub struct LoaderHandle {
    startup: Option<JoinHandle<LoadSummary>>,
    scheduled: Vec<JoinHandle<()>>,
}

impl LoaderHandle {
    /// Waits for the one-off startup loads to finish.
    ///
    /// Returns an empty summary when called a second time.
    pub async fn wait_startup(&mut self) -> LoadSummary {
        let Some(startup) = self.startup.take() else {
            return LoadSummary::default();
        };

        match startup.await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Startup load task did not complete: {}", e);
                LoadSummary::default()
            }
        }
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Stops every background task.
    pub fn shutdown(self) {
        if let Some(startup) = self.startup {
            startup.abort();
        }
        for task in self.scheduled {
            task.abort();
        }
    }
}

/// Loads feed resources and hands their tables to a [`LoaderListener`].
pub struct LoaderService {
    feed: Arc<dyn RateFeed>,
    listener: Arc<dyn LoaderListener>,
    registered: Mutex<HashSet<String>>,
    config: LoaderConfig,
}

impl LoaderService {
    pub fn new(feed: Arc<dyn RateFeed>, listener: Arc<dyn LoaderListener>) -> Self {
        Self {
            feed,
            listener,
            registered: Mutex::new(HashSet::new()),
            config: LoaderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn is_resource_registered(&self, resource_id: &str) -> bool {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(resource_id)
    }

    /// Registers `resource`, returning false if its id is already known.
    pub fn register(&self, resource: &LoadResource) -> bool {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resource.id.clone())
    }

    /// Loads one resource and notifies the listener.
    ///
    /// `Never` resources come from their backup file. Others come from the
    /// feed, falling back to the backup file when the fetch fails.
    pub async fn load_resource(&self, resource: &LoadResource) -> Result<LoadOutcome> {
        let fetched = match resource.policy {
            UpdatePolicy::Never => read_backup(resource).await,
            UpdatePolicy::OnStartup | UpdatePolicy::Scheduled(_) => {
                self.fetch_remote(resource).await
            }
        };

        match fetched {
            Ok(tables) => {
                let count = tables.len();
                self.listener.new_data_loaded(&resource.id, tables);
                Ok(LoadOutcome::Loaded { tables: count })
            }
            Err(e) if e.is_empty_range() => {
                debug!("No tables published for {}", resource.id);
                Ok(LoadOutcome::Empty)
            }
            Err(e) => {
                self.listener.load_failed(&resource.id, &e);
                Err(e.into())
            }
        }
    }

    async fn fetch_remote(
        &self,
        resource: &LoadResource,
    ) -> std::result::Result<Vec<NbpRatesTable>, MarketDataError> {
        match self.feed.fetch(resource).await {
            Err(error) if resource.backup.is_some() && !error.is_empty_range() => {
                warn!(
                    "{} fetch of {} failed ({}), trying backup",
                    self.feed.id(),
                    resource.id,
                    error
                );
                read_backup(resource).await.map_err(|backup_error| {
                    debug!("Backup for {} unusable: {}", resource.id, backup_error);
                    error
                })
            }
            other => other,
        }
    }

    /// Loads `resources` once each, with bounded concurrency.
    pub async fn load_all(&self, resources: &[LoadResource]) -> LoadSummary {
        let concurrency = self.config.startup_concurrency.max(1);

        let results: Vec<Result<LoadOutcome>> = stream::iter(resources.iter().cloned())
            .map(|resource| async move { self.load_resource(&resource).await })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut summary = LoadSummary::default();
        for result in &results {
            summary.record(result);
        }
        summary
    }

    /// Registers `resources` and starts loading them in the background.
    ///
    /// Resources whose id is already registered are skipped.
    pub fn start(self: &Arc<Self>, resources: Vec<LoadResource>) -> LoaderHandle {
        let mut startup = Vec::new();
        let mut scheduled = Vec::new();

        for resource in resources {
            if !self.register(&resource) {
                debug!("Resource {} already registered, skipping", resource.id);
                continue;
            }
            match resource.policy {
                UpdatePolicy::Scheduled(period) => scheduled.push((resource, period)),
                UpdatePolicy::Never | UpdatePolicy::OnStartup => startup.push(resource),
            }
        }

        info!(
            "Loader starting: {} one-off resources, {} scheduled",
            startup.len(),
            scheduled.len()
        );

        let service = Arc::clone(self);
        let startup_task = tokio::spawn(async move {
            let summary = service.load_all(&startup).await;
            info!(
                "Startup load finished: {} loaded, {} empty, {} failed",
                summary.loaded, summary.empty, summary.failed
            );
            summary
        });

        let scheduled_tasks = scheduled
            .into_iter()
            .map(|(resource, period)| {
                let service = Arc::clone(self);
                tokio::spawn(async move { service.run_scheduled(resource, period).await })
            })
            .collect();

        LoaderHandle {
            startup: Some(startup_task),
            scheduled: scheduled_tasks,
        }
    }

    async fn run_scheduled(&self, resource: LoadResource, period: Duration) {
        // First tick is immediate, subsequent ticks are `period` apart.
        let mut ticker = interval(period.max(MIN_REFRESH_PERIOD));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.load_resource(&resource).await {
                debug!("Scheduled load of {} failed: {}", resource.id, e);
            }
        }
    }
}
