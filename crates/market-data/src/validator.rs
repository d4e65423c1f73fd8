//! Rate record validation.
//!
//! Rejects feed triples that would break the rate store invariants before
//! they are recorded:
//! - currency code must be three uppercase ASCII letters
//! - rate must be strictly positive
//! - the base currency itself is never recorded

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use crate::models::RateRecord;

/// Outcome of validating a single record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted,
    Rejected(String),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// A rejected record, kept for reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub date: NaiveDate,
    pub code: String,
    pub message: String,
}

/// Summary of a batch validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub accepted: usize,
    pub rejected: Vec<ValidationIssue>,
}

/// Validates records against the base currency they are quoted in.
#[derive(Clone, Debug)]
pub struct RecordValidator {
    base_currency: String,
}

impl RecordValidator {
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
        }
    }

    /// Returns true for exactly three uppercase ASCII letters.
    pub fn is_valid_code(code: &str) -> bool {
        code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
    }

    pub fn validate(&self, record: &RateRecord) -> ValidationResult {
        if !Self::is_valid_code(&record.code) {
            return ValidationResult::Rejected(format!(
                "invalid currency code '{}'",
                record.code
            ));
        }

        if record.code == self.base_currency {
            return ValidationResult::Rejected(format!(
                "base currency {} cannot be quoted against itself",
                record.code
            ));
        }

        if record.rate <= Decimal::ZERO {
            return ValidationResult::Rejected(format!(
                "non-positive rate {} for {}",
                record.rate, record.code
            ));
        }

        ValidationResult::Accepted
    }

    /// Splits a batch into accepted records and a report of rejections.
    pub fn filter(&self, records: Vec<RateRecord>) -> (Vec<RateRecord>, ValidationReport) {
        let mut report = ValidationReport::default();
        let mut accepted = Vec::with_capacity(records.len());

        for record in records {
            match self.validate(&record) {
                ValidationResult::Accepted => accepted.push(record),
                ValidationResult::Rejected(message) => {
                    warn!(
                        "Rejected rate record {} on {}: {}",
                        record.code, record.date, message
                    );
                    report.rejected.push(ValidationIssue {
                        date: record.date,
                        code: record.code,
                        message,
                    });
                }
            }
        }

        report.accepted = accepted.len();
        (accepted, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
    }

    #[test]
    fn test_accepts_valid_record() {
        let validator = RecordValidator::new("PLN");
        let record = RateRecord::new(date(), "USD", dec!(3.9910));
        assert!(validator.validate(&record).is_accepted());
    }

    #[test]
    fn test_rejects_bad_codes() {
        let validator = RecordValidator::new("PLN");
        for code in ["usd", "US", "USDT", "U$D", ""] {
            let record = RateRecord::new(date(), code, dec!(1));
            assert!(!validator.validate(&record).is_accepted(), "{code}");
        }
    }

    #[test]
    fn test_rejects_base_currency() {
        let validator = RecordValidator::new("PLN");
        let record = RateRecord::new(date(), "PLN", dec!(1));
        assert!(!validator.validate(&record).is_accepted());
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        let validator = RecordValidator::new("PLN");
        let zero = RateRecord::new(date(), "USD", Decimal::ZERO);
        let negative = RateRecord::new(date(), "USD", dec!(-1.5));
        assert!(!validator.validate(&zero).is_accepted());
        assert!(!validator.validate(&negative).is_accepted());
    }

    #[test]
    fn test_filter_reports_rejections() {
        let validator = RecordValidator::new("PLN");
        let records = vec![
            RateRecord::new(date(), "USD", dec!(3.9910)),
            RateRecord::new(date(), "PLN", dec!(1)),
            RateRecord::new(date(), "EUR", dec!(4.3494)),
            RateRecord::new(date(), "xx", dec!(1)),
        ];

        let (accepted, report) = validator.filter(records);

        assert_eq!(accepted.len(), 2);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].code, "PLN");
        assert_eq!(report.rejected[1].code, "xx");
    }
}
