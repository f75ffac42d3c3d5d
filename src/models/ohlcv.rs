use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::DATE_FORMAT;

/// One OHLCV (Open, High, Low, Close, Volume) candle
///
/// The timestamp is a formatted string: `YYYY-MM-DD` for daily and
/// custom-range points, `YYYY-MM-DD HH:MM:SS` for intraday points. Price
/// fields are rounded to 2 decimals before a point becomes visible to any
/// consumer, so `low <= min(open, close)` and `high >= max(open, close)`
/// hold only up to one cent of rounding slack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvPoint {
    /// Formatted timestamp (date or date-time)
    pub timestamp: String,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Trading volume
    pub volume: u64,
}

impl OhlcvPoint {
    /// Calendar date of this point, parsed from the timestamp prefix
    pub fn date(&self) -> Option<NaiveDate> {
        let prefix = self.timestamp.get(..10)?;
        NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
    }

    /// Hour of an intraday timestamp, if present
    pub fn hour(&self) -> Option<u32> {
        let hh = self.timestamp.get(11..13)?;
        hh.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(timestamp: &str) -> OhlcvPoint {
        OhlcvPoint {
            timestamp: timestamp.to_string(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 1_000,
        }
    }

    #[test]
    fn test_date_from_daily_timestamp() {
        let p = point("2024-03-15");
        assert_eq!(p.date(), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(p.hour(), None);
    }

    #[test]
    fn test_date_and_hour_from_intraday_timestamp() {
        let p = point("2024-03-15 11:00:00");
        assert_eq!(p.date(), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(p.hour(), Some(11));
    }

    #[test]
    fn test_malformed_timestamp() {
        assert_eq!(point("not-a-date").date(), None);
    }
}
