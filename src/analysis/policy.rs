use chrono::{Months, NaiveDate};

use crate::config;
use crate::error::{FuturesError, Result};

/// Upper bound on the span of a seasonal-analysis request.
///
/// Spans are measured in calendar years: an end date at most `max_years`
/// years after the start date is accepted, leap days included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePolicy {
    pub max_years: u32,
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self {
            max_years: config::DEFAULT_MAX_RANGE_YEARS,
        }
    }
}

impl RangePolicy {
    pub fn new(max_years: u32) -> Self {
        Self { max_years }
    }

    /// Reject `[start, end]` if it spans more than `max_years`.
    ///
    /// Inverted ranges pass; they simply select no rows later on.
    pub fn check(&self, start: NaiveDate, end: NaiveDate) -> Result<()> {
        let limit = start.checked_add_months(Months::new(self.max_years.saturating_mul(12)));
        match limit {
            Some(limit) if end > limit => Err(FuturesError::DateRangeTooLarge {
                start,
                end,
                max_years: self.max_years,
            }),
            _ => Ok(()),
        }
    }
}
