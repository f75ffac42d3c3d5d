use std::time::Duration;

use crate::constants::{DEFAULT_MARKET_TIMEZONE, LIVE_TICK_SECS};

/// Get the market timezone from environment variable or use the default
pub fn get_market_timezone() -> String {
    std::env::var("FEEDSIM_TIMEZONE").unwrap_or_else(|_| DEFAULT_MARKET_TIMEZONE.to_string())
}

/// Get the live tick interval from environment variable or use the default
pub fn get_live_tick_interval() -> Duration {
    let secs = std::env::var("FEEDSIM_TICK_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(LIVE_TICK_SECS);
    Duration::from_secs(secs)
}

/// Round a price to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(180.456), 180.46);
        assert_eq!(round2(179.999), 180.0);
        assert_eq!(round2(42.0), 42.0);
        assert_eq!(round2(0.125), 0.13);
    }
}
