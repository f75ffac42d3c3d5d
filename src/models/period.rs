use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Chart period selector
///
/// `Day1` renders an hourly intraday grid; every other period maps to a
/// fixed lookback in calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[serde(rename = "1D")]
    Day1,
    #[serde(rename = "1W")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
    #[serde(rename = "3M")]
    Month3,
    #[serde(rename = "6M")]
    Month6,
    #[serde(rename = "1Y")]
    Year1,
    #[serde(rename = "2Y")]
    Year2,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::Day1 => "1D",
            ChartPeriod::Week1 => "1W",
            ChartPeriod::Month1 => "1M",
            ChartPeriod::Month3 => "3M",
            ChartPeriod::Month6 => "6M",
            ChartPeriod::Year1 => "1Y",
            ChartPeriod::Year2 => "2Y",
        }
    }

    /// Lookback length in calendar days; `None` for the intraday period
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            ChartPeriod::Day1 => None,
            ChartPeriod::Week1 => Some(7),
            ChartPeriod::Month1 => Some(30),
            ChartPeriod::Month3 => Some(90),
            ChartPeriod::Month6 => Some(180),
            ChartPeriod::Year1 => Some(365),
            ChartPeriod::Year2 => Some(730),
        }
    }

    /// All selectable periods, in display order
    pub fn all() -> Vec<ChartPeriod> {
        vec![
            ChartPeriod::Day1,
            ChartPeriod::Week1,
            ChartPeriod::Month1,
            ChartPeriod::Month3,
            ChartPeriod::Month6,
            ChartPeriod::Year1,
            ChartPeriod::Year2,
        ]
    }
}

impl FromStr for ChartPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1D" => Ok(ChartPeriod::Day1),
            "1W" => Ok(ChartPeriod::Week1),
            "1M" => Ok(ChartPeriod::Month1),
            "3M" => Ok(ChartPeriod::Month3),
            "6M" => Ok(ChartPeriod::Month6),
            "1Y" => Ok(ChartPeriod::Year1),
            "2Y" => Ok(ChartPeriod::Year2),
            other => Err(AppError::InvalidInput(format!(
                "Unknown chart period: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ChartPeriod {
    fn default() -> Self {
        ChartPeriod::Year1
    }
}
