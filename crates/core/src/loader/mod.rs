//! Loader module - registers feed resources and delivers their tables.
//!
//! One-off resources (historical windows, backups) are loaded once at
//! startup with bounded concurrency; scheduled resources (the current table)
//! are reloaded on a fixed interval for the lifetime of the process.

mod loader_service;
mod loader_traits;

pub use loader_service::{LoadOutcome, LoadSummary, LoaderConfig, LoaderHandle, LoaderService};
pub use loader_traits::LoaderListener;
