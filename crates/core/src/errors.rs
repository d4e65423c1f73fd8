//! Core error types.
//!
//! Feed errors from the market-data crate and FX errors from the resolver
//! both surface through [`Error`], so callers can hold one result type.

use nbp_fx_market_data::MarketDataError;
use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),
}
