//! Engine-wide constants
//!
//! Trading calendar, random-walk bands, and timestamp formats shared by the
//! series builder and the live update worker.

/// First trading hour of the synthetic session (inclusive)
pub const MARKET_OPEN_HOUR: u32 = 9;

/// Last trading hour of the synthetic session (inclusive)
pub const MARKET_CLOSE_HOUR: u32 = 16;

/// Default market timezone (overridable via `FEEDSIM_TIMEZONE`)
pub const DEFAULT_MARKET_TIMEZONE: &str = "America/New_York";

/// Seconds between live updates of the most recent point
/// (overridable via `FEEDSIM_TICK_SECS`)
pub const LIVE_TICK_SECS: u64 = 5;

/// Absolute jitter band added above/below the open/close when shaping a
/// candle's high and low. Independent of price scale.
pub const HIGH_LOW_JITTER: f64 = 0.8;

/// Per-point volume is `base_volume * (VOLUME_BAND_FLOOR + VOLUME_BAND_SPREAD * rand)`
pub const VOLUME_BAND_FLOOR: f64 = 0.8;
pub const VOLUME_BAND_SPREAD: f64 = 0.4;

/// Volatility band for historical intraday points (fixed, not per-profile)
pub const INTRADAY_VOLATILITY: f64 = 0.01;

/// Volatility band for freshly materialized intraday live points
pub const INTRADAY_LIVE_VOLATILITY: f64 = 0.005;

/// Volatility band applied when mutating the most recent point in place
pub const LIVE_TICK_VOLATILITY: f64 = 0.005;

/// Relative volume drift per live tick: `volume * (1 + (rand - 0.5) * VOLUME_TICK_DRIFT)`
pub const VOLUME_TICK_DRIFT: f64 = 0.1;

/// Intraday points carry an eighth of the profile's daily base volume
pub const INTRADAY_VOLUME_DIVISOR: u64 = 8;

/// Timestamp format for daily and custom-range points
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format for intraday points
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User-visible message when a cold load fails
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load stock data";
