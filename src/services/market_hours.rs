use chrono::{DateTime, Datelike, NaiveDate, Timelike, Weekday};
use chrono_tz::Tz;
use tracing::warn;

use crate::constants::{MARKET_CLOSE_HOUR, MARKET_OPEN_HOUR};
use crate::services::clock::Clock;
use crate::utils::get_market_timezone;

/// Trading calendar for the synthetic market
///
/// The session runs Monday through Friday, hours 9 to 16 inclusive, in the
/// configured market timezone.
#[derive(Debug, Clone)]
pub struct MarketHours {
    pub open_hour: u32,
    pub close_hour: u32,
    tz: Tz,
}

impl Default for MarketHours {
    fn default() -> Self {
        Self::with_timezone(chrono_tz::America::New_York)
    }
}

impl MarketHours {
    pub fn with_timezone(tz: Tz) -> Self {
        Self {
            open_hour: MARKET_OPEN_HOUR,
            close_hour: MARKET_CLOSE_HOUR,
            tz,
        }
    }

    /// Build from the `FEEDSIM_TIMEZONE` environment variable, falling back
    /// to the default market timezone when the value does not parse
    pub fn from_env() -> Self {
        let name = get_market_timezone();
        match name.parse::<Tz>() {
            Ok(tz) => Self::with_timezone(tz),
            Err(e) => {
                warn!("Failed to parse timezone '{}': {}", name, e);
                Self::default()
            }
        }
    }

    /// Current time in the market timezone
    pub fn now_local(&self, clock: &dyn Clock) -> DateTime<Tz> {
        clock.now_utc().with_timezone(&self.tz)
    }

    /// Today's calendar date in the market timezone
    pub fn today(&self, clock: &dyn Clock) -> NaiveDate {
        self.now_local(clock).date_naive()
    }

    /// Whether the market is open right now. Evaluated fresh on every call,
    /// never cached, so sessions running past the close stop updating on
    /// their own.
    pub fn is_open(&self, clock: &dyn Clock) -> bool {
        let now = self.now_local(clock);
        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        let hour = now.hour();
        hour >= self.open_hour && hour <= self.close_hour
    }

    /// The current hour clamped into the trading grid
    pub fn current_market_hour(&self, clock: &dyn Clock) -> u32 {
        self.now_local(clock).hour().clamp(self.open_hour, self.close_hour)
    }

    /// The hourly grid for one trading day
    pub fn hour_grid(&self) -> impl Iterator<Item = u32> {
        self.open_hour..=self.close_hour
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
