//! Series construction strategies
//!
//! Composes the random-walk generator across a calendar range: daily
//! lookbacks, the hourly intraday grid, and explicit custom ranges. Closes
//! chain from point to point; the first open comes from the instrument's
//! start price. Weekends never produce points; intraday points never fall
//! outside the trading-hour grid.
//!
//! Every strategy has a live variant producing exactly one point seeded
//! from an explicit last price instead of the profile's start price. The
//! live worker uses those to materialize a fresh bucket when the clock has
//! crossed a day or hour boundary since the series was built.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::constants::{
    DATE_FORMAT, INTRADAY_LIVE_VOLATILITY, INTRADAY_VOLATILITY, INTRADAY_VOLUME_DIVISOR,
};
use crate::models::{lookup_profile, OhlcvPoint, Series};
use crate::services::clock::Clock;
use crate::services::generator::{next_point, percentage_change};
use crate::services::market_hours::{is_weekend, MarketHours};

pub struct SeriesBuilder<'a> {
    clock: &'a dyn Clock,
    hours: &'a MarketHours,
}

impl<'a> SeriesBuilder<'a> {
    pub fn new(clock: &'a dyn Clock, hours: &'a MarketHours) -> Self {
        Self { clock, hours }
    }

    /// Daily series covering the `days` calendar days before today.
    /// Weekend days are skipped, so the result holds at most `days` points.
    pub fn daily(&self, rng: &mut impl Rng, ticker: &str, days: i64) -> Series {
        let Some(profile) = lookup_profile(ticker) else {
            return Vec::new();
        };

        let start = self.hours.today(self.clock) - Duration::days(days);
        let mut series = Vec::new();
        let mut price = profile.start_price;

        for offset in 0..days {
            let date = start + Duration::days(offset);
            if is_weekend(date) {
                continue;
            }
            let change = percentage_change(rng, profile.trend, profile.volatility);
            let point = next_point(
                rng,
                date.format(DATE_FORMAT).to_string(),
                price,
                change,
                profile.base_volume,
            );
            price = point.close;
            series.push(point);
        }
        series
    }

    /// One daily-granularity live point dated today, seeded from `last_price`.
    /// Half-band volatility dampens live movement. Weekends yield nothing.
    pub fn live_daily_point(
        &self,
        rng: &mut impl Rng,
        ticker: &str,
        last_price: f64,
    ) -> Option<OhlcvPoint> {
        let profile = lookup_profile(ticker)?;
        let today = self.hours.today(self.clock);
        if is_weekend(today) {
            return None;
        }
        let change = percentage_change(rng, profile.trend, profile.volatility * 0.5);
        Some(next_point(
            rng,
            today.format(DATE_FORMAT).to_string(),
            last_price,
            change,
            profile.base_volume,
        ))
    }

    /// Full hourly grid for today
    pub fn intraday(&self, rng: &mut impl Rng, ticker: &str) -> Series {
        self.intraday_grid(rng, ticker, self.hours.today(self.clock), None)
    }

    /// Hourly grid for today, truncated at the current trading hour while
    /// the market is open. When it is closed the full static grid is
    /// produced for display, still dated today.
    pub fn intraday_up_to_now(&self, rng: &mut impl Rng, ticker: &str) -> Series {
        if !self.hours.is_open(self.clock) {
            return self.intraday(rng, ticker);
        }
        let current = self.hours.current_market_hour(self.clock);
        self.intraday_grid(rng, ticker, self.hours.today(self.clock), Some(current))
    }

    /// Hourly grid for a specific date: full for past dates, truncated at
    /// the current hour for today, empty for future dates.
    pub fn intraday_for_date(&self, rng: &mut impl Rng, ticker: &str, date: NaiveDate) -> Series {
        let today = self.hours.today(self.clock);
        if date > today {
            return Vec::new();
        }
        let limit = if date == today {
            Some(self.hours.current_market_hour(self.clock))
        } else {
            None
        };
        self.intraday_grid(rng, ticker, date, limit)
    }

    /// One intraday live point at the current trading hour, seeded from
    /// `last_price`. Only produced while the market is open.
    pub fn live_intraday_point(
        &self,
        rng: &mut impl Rng,
        ticker: &str,
        last_price: f64,
    ) -> Option<OhlcvPoint> {
        let profile = lookup_profile(ticker)?;
        if !self.hours.is_open(self.clock) {
            return None;
        }
        let today = self.hours.today(self.clock);
        let hour = self.hours.current_market_hour(self.clock);
        let timestamp = intraday_timestamp(today, hour);
        let change = percentage_change(rng, profile.trend, INTRADAY_LIVE_VOLATILITY);
        Some(next_point(
            rng,
            timestamp,
            last_price,
            change,
            profile.base_volume / INTRADAY_VOLUME_DIVISOR,
        ))
    }

    /// Daily series over an explicit date range, endpoints inclusive,
    /// weekends skipped
    pub fn custom_range(
        &self,
        rng: &mut impl Rng,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Series {
        let Some(profile) = lookup_profile(ticker) else {
            return Vec::new();
        };

        let days = (end - start).num_days() + 1;
        let mut series = Vec::new();
        let mut price = profile.start_price;

        for offset in 0..days {
            let date = start + Duration::days(offset);
            if is_weekend(date) {
                continue;
            }
            let change = percentage_change(rng, profile.trend, profile.volatility);
            let point = next_point(
                rng,
                date.format(DATE_FORMAT).to_string(),
                price,
                change,
                profile.base_volume,
            );
            price = point.close;
            series.push(point);
        }
        series
    }

    fn intraday_grid(
        &self,
        rng: &mut impl Rng,
        ticker: &str,
        date: NaiveDate,
        up_to_hour: Option<u32>,
    ) -> Series {
        let Some(profile) = lookup_profile(ticker) else {
            return Vec::new();
        };

        let mut series = Vec::new();
        let mut price = profile.start_price;

        for hour in self.hours.hour_grid() {
            if let Some(limit) = up_to_hour {
                if hour > limit {
                    break;
                }
            }
            let change = percentage_change(rng, profile.trend, INTRADAY_VOLATILITY);
            let point = next_point(
                rng,
                intraday_timestamp(date, hour),
                price,
                change,
                profile.base_volume / INTRADAY_VOLUME_DIVISOR,
            );
            price = point.close;
            series.push(point);
        }
        series
    }
}

fn intraday_timestamp(date: NaiveDate, hour: u32) -> String {
    format!("{} {:02}:00:00", date.format(DATE_FORMAT), hour)
}
