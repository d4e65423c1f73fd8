use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("Rate unavailable for currency: {currency}")]
    RateUnavailable { currency: String },

    #[error("Currency conversion data not yet loaded: {0}")]
    DataNotYetLoaded(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),
}

impl FxError {
    pub fn rate_unavailable(currency: &str) -> Self {
        Self::RateUnavailable {
            currency: currency.to_string(),
        }
    }
}
