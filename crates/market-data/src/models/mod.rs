//! Feed models
//!
//! - `nbp_table` - NBP JSON table shapes and payload decoding
//! - `rate_record` - Flattened `(date, code, rate)` triple handed to the rate store
//! - `resource` - Load resources and their update policies

mod nbp_table;
mod rate_record;
mod resource;

pub use nbp_table::{flatten_tables, parse_tables, NbpRate, NbpRatesTable};
pub use rate_record::RateRecord;
pub use resource::{LoadResource, ResourceKind, UpdatePolicy};
