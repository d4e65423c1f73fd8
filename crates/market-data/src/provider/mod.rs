//! Rate feed abstractions and implementations.
//!
//! - The `RateFeed` trait implemented by every table source
//! - The NBP HTTP client
//! - Backup file reading

pub mod backup;
pub mod nbp;
mod traits;

pub use traits::RateFeed;
