//! NBP Market Data Crate
//!
//! This crate turns the Narodowy Bank Polski table A feed into
//! `(date, currency, rate)` records for the rate store.
//!
//! # Overview
//!
//! - [`NbpRatesTable`] / [`NbpRate`] - JSON shapes published by NBP
//! - [`RateRecord`] - flattened triple handed to the store
//! - [`RecordValidator`] - rejects records that would break store invariants
//! - [`LoadPlan`] - current table + three-month historical windows
//! - [`RateFeed`] - source trait, implemented over HTTP by [`NbpProvider`]
//!
//! Rates are quoted as PLN per 1 unit of the foreign currency.

pub mod errors;
pub mod models;
pub mod plan;
pub mod provider;
pub mod validator;

pub use errors::MarketDataError;
pub use models::{
    flatten_tables, parse_tables, LoadResource, NbpRate, NbpRatesTable, RateRecord, ResourceKind,
    UpdatePolicy,
};
pub use plan::{LoadPlan, CURRENT_RESOURCE_ID, DEFAULT_REFRESH_PERIOD};
pub use provider::backup::read_backup;
pub use provider::nbp::NbpProvider;
pub use provider::RateFeed;
pub use validator::{RecordValidator, ValidationIssue, ValidationReport, ValidationResult};
