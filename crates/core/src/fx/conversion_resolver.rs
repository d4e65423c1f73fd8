use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use nbp_fx_market_data::RecordValidator;
use rust_decimal::{Decimal, RoundingStrategy};

use super::fallback_policy::FallbackPolicy;
use super::fx_errors::FxError;
use super::rate_store::RateStore;
use crate::constants::DIVISION_SIGNIFICANT_DIGITS;

/// Resolves conversion factors from the rates held in a [`RateStore`].
///
/// A factor is the amount of `term` obtained for 1 unit of `base`. Stored
/// rates are base-currency per 1 unit of foreign currency, so:
/// - foreign -> base uses the stored rate as is
/// - base -> foreign inverts it
/// - foreign -> foreign divides the two legs (triangulation through base)
///
/// The resolver is stateless apart from its configuration and can be
/// shared freely across concurrent queries.
#[derive(Clone)]
pub struct ConversionResolver {
    store: Arc<RateStore>,
    policy: FallbackPolicy,
}

impl ConversionResolver {
    pub fn new(store: Arc<RateStore>, policy: FallbackPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Candidate dates for `as_of`, defaulting to today (UTC).
    pub fn candidate_dates(&self, as_of: Option<NaiveDate>) -> Vec<NaiveDate> {
        let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
        self.policy.candidate_dates(as_of)
    }

    /// Factor converting 1 `base` into `term` as of `as_of`.
    pub fn resolve(
        &self,
        base: &str,
        term: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Decimal, FxError> {
        let dates = self.candidate_dates(as_of);
        self.resolve_on_dates(base, term, &dates)
    }

    /// Same as [`resolve`](Self::resolve) with an explicit candidate sequence.
    /// Both legs of a cross conversion walk the same sequence.
    pub fn resolve_on_dates(
        &self,
        base: &str,
        term: &str,
        dates: &[NaiveDate],
    ) -> Result<Decimal, FxError> {
        let base = normalize_code(base)?;
        let term = normalize_code(term)?;

        self.triangulate(&base, &term, |code| {
            self.store.lookup_with_fallback(dates, code)
        })
    }

    /// Factor using the latest known rate of each leg.
    pub fn resolve_latest(&self, base: &str, term: &str) -> Result<Decimal, FxError> {
        let base = normalize_code(base)?;
        let term = normalize_code(term)?;

        self.triangulate(&base, &term, |code| self.store.lookup_latest(code))
    }

    fn triangulate<F>(&self, base: &str, term: &str, rate_of: F) -> Result<Decimal, FxError>
    where
        F: Fn(&str) -> Option<Decimal>,
    {
        if base == term {
            return Ok(Decimal::ONE);
        }

        let leg = |code: &str| rate_of(code).ok_or_else(|| FxError::rate_unavailable(code));
        let anchor = self.store.base_currency();

        if base == anchor {
            divide(Decimal::ONE, leg(term)?)
        } else if term == anchor {
            leg(base)
        } else {
            divide(leg(base)?, leg(term)?)
        }
    }
}

/// Upper-cases and validates an ISO 4217 code from a query.
pub fn normalize_code(code: &str) -> Result<String, FxError> {
    let normalized = code.trim().to_ascii_uppercase();
    if RecordValidator::is_valid_code(&normalized) {
        Ok(normalized)
    } else {
        Err(FxError::InvalidCurrencyCode(code.to_string()))
    }
}

/// Division rounded to 16 significant digits, half-even.
pub fn divide(numerator: Decimal, denominator: Decimal) -> Result<Decimal, FxError> {
    numerator
        .checked_div(denominator)
        .and_then(|quotient| {
            quotient.round_sf_with_strategy(
                DIVISION_SIGNIFICANT_DIGITS,
                RoundingStrategy::MidpointNearestEven,
            )
        })
        .ok_or_else(|| {
            FxError::ArithmeticOverflow(format!("{} / {}", numerator, denominator))
        })
}
