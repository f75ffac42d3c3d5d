use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ChartPeriod;

/// Explicit start/end date pair, mutually exclusive with a fixed period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of calendar days covered, endpoints inclusive
    pub fn calendar_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether the range collapses to a single calendar date
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }
}

/// The active (ticker, period-or-range) request
///
/// Exactly one of `period` and `range` drives series construction:
/// the range when `use_custom_range` is set, the period otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub ticker: String,
    pub period: ChartPeriod,
    pub use_custom_range: bool,
    pub range: Option<DateRange>,
}

impl Selection {
    /// Fixed-period selection
    pub fn period(ticker: impl Into<String>, period: ChartPeriod) -> Self {
        Self {
            ticker: ticker.into(),
            period,
            use_custom_range: false,
            range: None,
        }
    }

    /// Custom date-range selection
    pub fn custom_range(ticker: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            period: ChartPeriod::default(),
            use_custom_range: true,
            range: Some(DateRange { start, end }),
        }
    }

    /// The custom range, when one is active
    pub fn active_range(&self) -> Option<&DateRange> {
        if self.use_custom_range {
            self.range.as_ref()
        } else {
            None
        }
    }
}
