use chrono::NaiveDate;
use dashmap::DashMap;
use log::warn;
use nbp_fx_market_data::RateRecord;
use rust_decimal::Decimal;

/// Concurrent table of base-relative mid-rates keyed by `(date, currency)`.
///
/// Each key is replaced atomically, so readers observe either nothing or a
/// complete value. Writes to different keys never block each other beyond
/// the owning shard, and the per-currency latest-date index answers
/// "latest known" lookups without scanning the history.
pub struct RateStore {
    /// Key: (effective date, currency code)
    /// Value: amount of base currency per 1 unit of the currency
    rates: DashMap<(NaiveDate, String), Decimal>,

    /// Most recent effective date recorded per currency.
    latest: DashMap<String, NaiveDate>,

    base_currency: String,
}

impl RateStore {
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            rates: DashMap::new(),
            latest: DashMap::new(),
            base_currency: base_currency.into(),
        }
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Inserts or overwrites the rate for `(date, code)`.
    ///
    /// Non-positive rates and the base currency are never stored; such
    /// values are dropped with a warning.
    pub fn record_rate(&self, date: NaiveDate, code: &str, rate: Decimal) {
        if code == self.base_currency {
            warn!("Ignoring {} rate quoted against itself on {}", code, date);
            return;
        }
        if rate <= Decimal::ZERO {
            warn!("Ignoring non-positive {} rate {} on {}", code, rate, date);
            return;
        }

        // The rate must be visible before the index points at its date.
        self.rates.insert((date, code.to_string()), rate);

        self.latest
            .entry(code.to_string())
            .and_modify(|latest| {
                if date > *latest {
                    *latest = date;
                }
            })
            .or_insert(date);
    }

    /// Records a batch of feed records, returning how many were stored.
    pub fn record_all(&self, records: impl IntoIterator<Item = RateRecord>) -> usize {
        let mut recorded = 0;
        for record in records {
            self.record_rate(record.date, &record.code, record.rate);
            recorded += 1;
        }
        recorded
    }

    pub fn lookup_on_date(&self, date: NaiveDate, code: &str) -> Option<Decimal> {
        self.rates
            .get(&(date, code.to_string()))
            .map(|entry| *entry.value())
    }

    /// First exact match walking `candidate_dates` in order.
    pub fn lookup_with_fallback(&self, candidate_dates: &[NaiveDate], code: &str) -> Option<Decimal> {
        candidate_dates
            .iter()
            .find_map(|date| self.lookup_on_date(*date, code))
    }

    /// Rate on the most recent date that has an entry for `code`.
    pub fn lookup_latest(&self, code: &str) -> Option<Decimal> {
        let date = self.latest_date(code)?;
        self.lookup_on_date(date, code)
    }

    pub fn latest_date(&self, code: &str) -> Option<NaiveDate> {
        self.latest.get(code).map(|entry| *entry.value())
    }

    /// Currencies with at least one recorded rate, sorted.
    pub fn currencies(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.latest.iter().map(|entry| entry.key().clone()).collect();
        codes.sort();
        codes
    }

    /// Number of `(date, currency)` entries.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::thread;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_and_lookup_on_date() {
        let store = RateStore::new("PLN");
        store.record_rate(ymd(2023, 12, 1), "USD", dec!(3.9910));

        assert_eq!(store.lookup_on_date(ymd(2023, 12, 1), "USD"), Some(dec!(3.9910)));
        assert_eq!(store.lookup_on_date(ymd(2023, 12, 2), "USD"), None);
        assert_eq!(store.lookup_on_date(ymd(2023, 12, 1), "EUR"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let store = RateStore::new("PLN");
        store.record_rate(ymd(2023, 12, 1), "USD", dec!(3.9910));
        store.record_rate(ymd(2023, 12, 1), "USD", dec!(4.0001));

        assert_eq!(store.lookup_on_date(ymd(2023, 12, 1), "USD"), Some(dec!(4.0001)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rejects_base_and_non_positive() {
        let store = RateStore::new("PLN");
        store.record_rate(ymd(2023, 12, 1), "PLN", dec!(1));
        store.record_rate(ymd(2023, 12, 1), "USD", Decimal::ZERO);
        store.record_rate(ymd(2023, 12, 1), "EUR", dec!(-4.3));

        assert!(store.is_empty());
        assert!(store.currencies().is_empty());
    }

    #[test]
    fn test_fallback_first_match_wins() {
        let store = RateStore::new("PLN");
        store.record_rate(ymd(2023, 12, 1), "USD", dec!(3.9910));
        store.record_rate(ymd(2023, 11, 30), "USD", dec!(4.0022));

        // Order of the sequence decides, not proximity.
        let dates = [ymd(2023, 12, 3), ymd(2023, 11, 30), ymd(2023, 12, 1)];
        assert_eq!(store.lookup_with_fallback(&dates, "USD"), Some(dec!(4.0022)));
    }

    #[test]
    fn test_fallback_ignores_dates_outside_sequence() {
        let store = RateStore::new("PLN");
        store.record_rate(ymd(2023, 12, 1), "USD", dec!(3.9910));

        let dates = [ymd(2023, 12, 4), ymd(2023, 12, 3), ymd(2023, 12, 2)];
        assert_eq!(store.lookup_with_fallback(&dates, "USD"), None);
        assert_eq!(store.lookup_with_fallback(&[], "USD"), None);
    }

    #[test]
    fn test_latest_tolerates_out_of_order_inserts() {
        let store = RateStore::new("PLN");
        store.record_rate(ymd(2023, 12, 1), "USD", dec!(3.9910));
        // Historical backfill arriving after current data.
        store.record_rate(ymd(2023, 6, 1), "USD", dec!(4.2000));
        store.record_rate(ymd(2023, 6, 1), "EUR", dec!(4.5000));

        assert_eq!(store.lookup_latest("USD"), Some(dec!(3.9910)));
        assert_eq!(store.latest_date("USD"), Some(ymd(2023, 12, 1)));
        assert_eq!(store.lookup_latest("EUR"), Some(dec!(4.5000)));
        assert_eq!(store.lookup_latest("CHF"), None);
    }

    #[test]
    fn test_latest_is_per_currency() {
        let store = RateStore::new("PLN");
        store.record_rate(ymd(2023, 12, 1), "USD", dec!(3.9910));
        store.record_rate(ymd(2023, 12, 4), "EUR", dec!(4.3400));

        // The newest table overall has no USD entry.
        assert_eq!(store.lookup_latest("USD"), Some(dec!(3.9910)));
        assert_eq!(store.currencies(), vec!["EUR".to_string(), "USD".to_string()]);
    }

    #[test]
    fn test_record_all() {
        let store = RateStore::new("PLN");
        let recorded = store.record_all(vec![
            RateRecord::new(ymd(2023, 12, 1), "USD", dec!(3.9910)),
            RateRecord::new(ymd(2023, 12, 1), "EUR", dec!(4.3494)),
        ]);

        assert_eq!(recorded, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_writers_lose_no_updates() {
        let store = Arc::new(RateStore::new("PLN"));
        let start = ymd(2020, 1, 1);

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for day in 0..100u64 {
                        let date = start + chrono::Days::new(worker * 100 + day);
                        store.record_rate(date, "USD", Decimal::from(worker * 100 + day + 1));
                        store.record_rate(date, "EUR", Decimal::from(worker + 1));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1600);
        assert_eq!(store.latest_date("USD"), Some(start + chrono::Days::new(799)));
        assert_eq!(store.lookup_latest("USD"), Some(Decimal::from(800)));
        assert_eq!(
            store.lookup_on_date(start + chrono::Days::new(250), "USD"),
            Some(Decimal::from(251))
        );
    }
}
