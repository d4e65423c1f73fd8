use chrono::NaiveDate;

use crate::constants::DEFAULT_WALK_BACK_DAYS;

/// Builds the candidate date sequence tried for a query date.
///
/// The sequence starts at the requested date and walks back one calendar
/// day at a time, so a Monday query on a closed market finds Friday's table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackPolicy {
    walk_back_days: u32,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WALK_BACK_DAYS)
    }
}

impl FallbackPolicy {
    pub const fn new(walk_back_days: u32) -> Self {
        Self { walk_back_days }
    }

    /// Same-day matches only.
    pub const fn exact() -> Self {
        Self::new(0)
    }

    pub fn walk_back_days(&self) -> u32 {
        self.walk_back_days
    }

    /// `[as_of, as_of - 1, ..., as_of - walk_back_days]`, most preferred first.
    pub fn candidate_dates(&self, as_of: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(self.walk_back_days as usize + 1);
        let mut current = Some(as_of);

        while let Some(date) = current {
            dates.push(date);
            if dates.len() > self.walk_back_days as usize {
                break;
            }
            current = date.pred_opt();
        }

        dates
    }
}
