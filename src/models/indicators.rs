//! Technical indicators derived from a price series
//!
//! The only indicator the feed computes is the Simple Moving Average. SMA
//! vectors stay index-aligned with the series they were derived from so the
//! presentation layer can overlay them without reindexing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::round2;

/// One configured SMA window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmaConfig {
    /// Trailing window length; unique within a config set
    pub period: u32,
    pub enabled: bool,
    pub label: String,
    pub color: String,
}

impl SmaConfig {
    pub fn new(period: u32, enabled: bool, color: &str) -> Self {
        Self {
            period,
            enabled,
            label: format!("SMA({})", period),
            color: color.to_string(),
        }
    }
}

/// Chart defaults: SMA 50 and 150 shown, 20 and 200 available but off
pub fn default_sma_configs() -> Vec<SmaConfig> {
    vec![
        SmaConfig::new(20, false, "#f59e0b"),
        SmaConfig::new(50, true, "#3b82f6"),
        SmaConfig::new(150, true, "#8b5cf6"),
        SmaConfig::new(200, false, "#ef4444"),
    ]
}

/// Map from enabled SMA period to its value sequence, index-aligned with
/// the series it was derived from
pub type IndicatorSeries = BTreeMap<u32, Vec<f64>>;

/// Calculate the Simple Moving Average over closing prices
///
/// Index `i >= period - 1` holds the 2-decimal-rounded mean of
/// `closes[i - period + 1..=i]`. The first `period - 1` entries are
/// backward-filled with the first fully-windowed value so the visual series
/// has no leading gap. A series shorter than the window yields an empty
/// vector; so does an empty input.
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }

    let mut values = Vec::with_capacity(closes.len());
    let mut first_windowed = 0.0;

    for i in (period - 1)..closes.len() {
        let start = i + 1 - period;
        let sum: f64 = closes[start..=i].iter().sum();
        let sma = round2(sum / period as f64);
        if i == period - 1 {
            first_windowed = sma;
        }
        values.push(sma);
    }

    let mut filled = vec![first_windowed; period - 1];
    filled.append(&mut values);
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_values_and_backfill() {
        let closes = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        let ma3 = calculate_sma(&closes, 3);

        assert_eq!(ma3.len(), closes.len());
        // Backward-filled with the first fully-windowed value
        assert_eq!(ma3[0], 11.0);
        assert_eq!(ma3[1], 11.0);
        assert_eq!(ma3[2], 11.0); // (10+11+12)/3
        assert_eq!(ma3[3], 12.0); // (11+12+13)/3
        assert_eq!(ma3[4], 13.0); // (12+13+14)/3
        assert_eq!(ma3[5], 14.0); // (13+14+15)/3
    }

    #[test]
    fn test_sma_backfill_law() {
        let closes: Vec<f64> = (1..=30).map(|v| v as f64 * 1.5).collect();
        let period = 7;
        let sma = calculate_sma(&closes, period);

        assert_eq!(sma.len(), closes.len());
        for i in 0..period - 1 {
            assert_eq!(sma[i], sma[period - 1]);
        }
    }

    #[test]
    fn test_sma_rounding() {
        let closes = vec![10.0, 10.1, 10.3];
        let sma = calculate_sma(&closes, 3);
        // (10.0 + 10.1 + 10.3) / 3 = 10.1333...
        assert_eq!(sma[2], 10.13);
    }

    #[test]
    fn test_sma_empty_input() {
        assert!(calculate_sma(&[], 5).is_empty());
    }

    #[test]
    fn test_sma_window_longer_than_series() {
        let closes = vec![10.0, 11.0];
        assert!(calculate_sma(&closes, 3).is_empty());
    }

    #[test]
    fn test_default_configs_have_unique_periods() {
        let configs = default_sma_configs();
        let mut periods: Vec<u32> = configs.iter().map(|c| c.period).collect();
        periods.dedup();
        assert_eq!(periods.len(), configs.len());
        assert!(configs.iter().any(|c| c.period == 50 && c.enabled));
        assert!(configs.iter().any(|c| c.period == 20 && !c.enabled));
    }
}
