//! Error types for the NBP feed crate.
//!
//! This module provides [`MarketDataError`], the error enum returned by feed
//! clients, payload parsing and backup readers.

use thiserror::Error;

/// Errors that can occur while fetching or decoding exchange rate tables.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No tables were published for the requested date range.
    /// NBP answers such requests with HTTP 404; weekends and holidays
    /// produce this for short ranges.
    #[error("No data for date range")]
    NoDataForRange,

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The payload could not be decoded into rate tables.
    #[error("Malformed payload for {resource}: {message}")]
    MalformedPayload {
        /// Resource identifier the payload belongs to
        resource: String,
        /// Decoder error message
        message: String,
    },

    /// A backup file could not be read.
    #[error("Backup unavailable for {resource}: {message}")]
    BackupUnavailable {
        /// Resource identifier the backup belongs to
        resource: String,
        /// I/O error message
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the error means "nothing was published" rather than a failure.
    ///
    /// The loader treats such resources as successfully loaded empty batches.
    pub fn is_empty_range(&self) -> bool {
        matches!(self, Self::NoDataForRange)
    }
}
