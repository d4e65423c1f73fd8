//! NBP FX Core - rate store, conversion resolver and loader.
//!
//! This crate keeps daily NBP mid-rates in memory and answers conversion
//! queries against them. The feed itself (HTTP, JSON, load planning) lives
//! in the `nbp-fx-market-data` crate; this crate only consumes its
//! records through the [`loader`] module.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod loader;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
