//! Random-walk candle generation
//!
//! Pure functions from an opening price (or an existing candle) plus an RNG
//! to a new [`OhlcvPoint`]. Callers own the RNG so tests can seed it.

use rand::Rng;

use crate::constants::{
    HIGH_LOW_JITTER, LIVE_TICK_VOLATILITY, VOLUME_BAND_FLOOR, VOLUME_BAND_SPREAD,
    VOLUME_TICK_DRIFT,
};
use crate::models::OhlcvPoint;
use crate::utils::round2;

/// Percentage change for one bucket: the profile's drift plus a uniform
/// draw over the volatility band
pub fn percentage_change(rng: &mut impl Rng, trend: f64, volatility: f64) -> f64 {
    trend + (rng.gen::<f64>() - 0.5) * volatility
}

/// Build one candle from its opening price and percentage change
///
/// High and low are jittered by a fixed absolute band rather than one scaled
/// to the price, so after 2-decimal rounding they can land up to a cent
/// inside the open/close envelope.
pub fn next_point(
    rng: &mut impl Rng,
    timestamp: String,
    open: f64,
    change: f64,
    base_volume: u64,
) -> OhlcvPoint {
    let close = open * (1.0 + change);
    let high = open.max(close) + rng.gen::<f64>() * HIGH_LOW_JITTER;
    let low = open.min(close) - rng.gen::<f64>() * HIGH_LOW_JITTER;
    let volume = base_volume as f64 * (VOLUME_BAND_FLOOR + VOLUME_BAND_SPREAD * rng.gen::<f64>());

    OhlcvPoint {
        timestamp,
        open: round2(open),
        high: round2(high),
        low: round2(low),
        close: round2(close),
        volume: volume.floor() as u64,
    }
}

/// Mutate the most recent candle for one live tick
///
/// Close takes a dampened random step; high and low only ever widen against
/// the prior candle; open and timestamp are untouched.
pub fn update_live_point(rng: &mut impl Rng, point: &OhlcvPoint, trend: f64) -> OhlcvPoint {
    let change = percentage_change(rng, trend, LIVE_TICK_VOLATILITY);
    let close = point.close * (1.0 + change);
    let volume = point.volume as f64 * (1.0 + (rng.gen::<f64>() - 0.5) * VOLUME_TICK_DRIFT);

    OhlcvPoint {
        timestamp: point.timestamp.clone(),
        open: point.open,
        high: round2(point.high.max(close)),
        low: round2(point.low.min(close)),
        close: round2(close),
        volume: volume.floor() as u64,
    }
}
