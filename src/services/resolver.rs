//! Selection resolution
//!
//! Maps the active (ticker, period-or-range) request to the right series
//! construction strategy and applies the display-freshness correction to
//! the freshly built series.

use rand::Rng;

use crate::constants::{DATETIME_FORMAT, DATE_FORMAT};
use crate::error::{AppError, Result};
use crate::models::{ChartPeriod, Selection, Series};
use crate::services::clock::Clock;
use crate::services::market_hours::MarketHours;
use crate::services::series_builder::SeriesBuilder;

pub struct SelectionResolver<'a> {
    clock: &'a dyn Clock,
    hours: &'a MarketHours,
}

impl<'a> SelectionResolver<'a> {
    pub fn new(clock: &'a dyn Clock, hours: &'a MarketHours) -> Self {
        Self { clock, hours }
    }

    /// Build the series for a selection
    ///
    /// A custom range collapsing to one calendar date uses the intraday
    /// grid for that date; any other range walks it day by day. Without a
    /// custom range, 1D resolves to the intraday grid truncated at the
    /// current hour and every other period to its daily lookback. Unknown
    /// tickers resolve to an empty series. A range whose start is after its
    /// end is the one genuinely invalid input and surfaces as an error.
    pub fn resolve(&self, rng: &mut impl Rng, selection: &Selection) -> Result<Series> {
        let builder = SeriesBuilder::new(self.clock, self.hours);

        let mut series = if let Some(range) = selection.active_range() {
            if range.start > range.end {
                return Err(AppError::InvalidInput(format!(
                    "Date range start {} is after end {}",
                    range.start, range.end
                )));
            }
            if range.is_single_day() {
                builder.intraday_for_date(rng, &selection.ticker, range.start)
            } else {
                builder.custom_range(rng, &selection.ticker, range.start, range.end)
            }
        } else if selection.period == ChartPeriod::Day1 {
            builder.intraday_up_to_now(rng, &selection.ticker)
        } else {
            // Non-1D periods always carry a lookback
            let days = selection.period.lookback_days().unwrap_or(365);
            builder.daily(rng, &selection.ticker, days)
        };

        self.ensure_last_point_is_today(&mut series, selection);
        Ok(series)
    }

    /// Rewrite the final point's timestamp to today when the series ends on
    /// an older date. Display freshness only: prices and volume are
    /// untouched, and nothing happens to an empty series.
    fn ensure_last_point_is_today(&self, series: &mut Series, selection: &Selection) {
        let Some(last) = series.last_mut() else {
            return;
        };
        let today = self.hours.today(self.clock);
        if last.date() == Some(today) {
            return;
        }

        let intraday = !selection.use_custom_range && selection.period == ChartPeriod::Day1;
        last.timestamp = if intraday {
            self.hours.now_local(self.clock).format(DATETIME_FORMAT).to_string()
        } else {
            today.format(DATE_FORMAT).to_string()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Selection;
    use crate::services::clock::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    fn hours() -> MarketHours {
        MarketHours::with_timezone(chrono_tz::UTC)
    }

    /// Wednesday 2024-03-13 at 11:00
    fn wednesday_clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 13, 11, 0, 0).unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_period_on_wednesday_has_five_trading_days() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);
        let selection = Selection::period("IBM", ChartPeriod::Week1);
        let series = resolver.resolve(&mut rng(), &selection).unwrap();

        assert_eq!(series.len(), 5);
        let dates: Vec<_> = series.iter().filter_map(|p| p.date()).collect();
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_freshness_correction_rewrites_last_date() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);
        let selection = Selection::period("IBM", ChartPeriod::Week1);
        let series = resolver.resolve(&mut rng(), &selection).unwrap();

        // The daily walk ends the day before today; the correction
        // re-dates that final point to today.
        assert_eq!(series.last().unwrap().date(), Some(date(2024, 3, 13)));
    }

    #[test]
    fn test_freshness_correction_leaves_prices_untouched() {
        let clock = wednesday_clock();
        let market = hours();

        let builder = SeriesBuilder::new(&clock, &market);
        let mut seeded = StdRng::seed_from_u64(5);
        let raw = builder.daily(&mut seeded, "IBM", 7);

        let resolver = SelectionResolver::new(&clock, &market);
        let mut seeded = StdRng::seed_from_u64(5);
        let resolved = resolver
            .resolve(&mut seeded, &Selection::period("IBM", ChartPeriod::Week1))
            .unwrap();

        let raw_last = raw.last().unwrap();
        let resolved_last = resolved.last().unwrap();
        assert_eq!(resolved_last.open, raw_last.open);
        assert_eq!(resolved_last.close, raw_last.close);
        assert_eq!(resolved_last.volume, raw_last.volume);
        assert_ne!(resolved_last.timestamp, raw_last.timestamp);
    }

    #[test]
    fn test_single_day_range_uses_intraday_grid() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);

        // Friday 2024-03-08 in the past: full 8-hour grid
        let selection = Selection::custom_range("IBM", date(2024, 3, 8), date(2024, 3, 8));
        let series = resolver.resolve(&mut rng(), &selection).unwrap();
        assert_eq!(series.len(), 8);
        assert_eq!(series[0].timestamp, "2024-03-08 09:00:00");
    }

    #[test]
    fn test_single_day_range_friday_in_the_past() {
        // Viewed from the following Wednesday, 2024-03-15 (a Friday) gets
        // the full hourly grid
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 20, 11, 0, 0).unwrap());
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);

        let selection = Selection::custom_range("IBM", date(2024, 3, 15), date(2024, 3, 15));
        let series = resolver.resolve(&mut rng(), &selection).unwrap();
        assert_eq!(series.len(), 8);
        assert_eq!(series[0].timestamp, "2024-03-15 09:00:00");
        assert_eq!(series[6].timestamp, "2024-03-15 15:00:00");
        // The freshness correction re-dates only the final point
        assert_eq!(series[7].date(), Some(date(2024, 3, 20)));
    }

    #[test]
    fn test_single_day_range_today_truncates_at_current_hour() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);

        let selection = Selection::custom_range("IBM", date(2024, 3, 13), date(2024, 3, 13));
        let series = resolver.resolve(&mut rng(), &selection).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_multi_day_range_uses_daily_walk() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);

        let selection = Selection::custom_range("IBM", date(2024, 3, 4), date(2024, 3, 8));
        let series = resolver.resolve(&mut rng(), &selection).unwrap();
        assert_eq!(series.len(), 5);
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);

        let selection = Selection::custom_range("IBM", date(2024, 3, 8), date(2024, 3, 4));
        assert!(resolver.resolve(&mut rng(), &selection).is_err());
    }

    #[test]
    fn test_unknown_ticker_resolves_to_empty() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);

        for selection in [
            Selection::period("NVDA", ChartPeriod::Day1),
            Selection::period("NVDA", ChartPeriod::Year1),
            Selection::custom_range("NVDA", date(2024, 3, 4), date(2024, 3, 8)),
        ] {
            assert!(resolver.resolve(&mut rng(), &selection).unwrap().is_empty());
        }
    }

    #[test]
    fn test_resolution_is_idempotent_under_frozen_clock() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);

        for selection in [
            Selection::period("IBM", ChartPeriod::Day1),
            Selection::period("IBM", ChartPeriod::Month1),
            Selection::period("AAPL", ChartPeriod::Year2),
            Selection::custom_range("IBM", date(2024, 2, 1), date(2024, 3, 1)),
        ] {
            let first = resolver.resolve(&mut rng(), &selection).unwrap();
            let second = resolver.resolve(&mut rng(), &selection).unwrap();

            assert_eq!(first.len(), second.len());
            for (a, b) in first.iter().zip(second.iter()) {
                assert_eq!(a.timestamp, b.timestamp);
            }
        }
    }

    #[test]
    fn test_intraday_series_has_no_duplicate_timestamps() {
        let clock = wednesday_clock();
        let market = hours();
        let resolver = SelectionResolver::new(&clock, &market);
        let series = resolver
            .resolve(&mut rng(), &Selection::period("IBM", ChartPeriod::Day1))
            .unwrap();

        let mut stamps: Vec<_> = series.iter().map(|p| p.timestamp.clone()).collect();
        let len = stamps.len();
        stamps.dedup();
        assert_eq!(stamps.len(), len);
    }
}
