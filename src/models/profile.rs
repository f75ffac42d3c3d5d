use serde::Serialize;

/// Statistical profile driving the random walk for one instrument
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InstrumentProfile {
    /// Price the walk starts from when no prior close exists
    pub start_price: f64,

    /// Daily percentage-change band
    pub volatility: f64,

    /// Constant drift added to every percentage change
    pub trend: f64,

    /// Typical daily volume before the per-point band is applied
    pub base_volume: u64,
}

/// A supported ticker with its display name and walk profile
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Instrument {
    pub ticker: &'static str,
    pub name: &'static str,
    pub profile: InstrumentProfile,
}

/// Supported instruments. Lookups for anything else yield no data rather
/// than an error.
pub const INSTRUMENTS: &[Instrument] = &[
    Instrument {
        ticker: "IBM",
        name: "International Business Machines Corp.",
        profile: InstrumentProfile {
            start_price: 180.0,
            volatility: 0.02,
            trend: 0.0001,
            base_volume: 8_000_000,
        },
    },
    Instrument {
        ticker: "AAPL",
        name: "Apple Inc.",
        profile: InstrumentProfile {
            start_price: 280.0,
            volatility: 0.025,
            trend: 0.0002,
            base_volume: 12_000_000,
        },
    },
];

/// Look up the walk profile for a ticker symbol
pub fn lookup_profile(ticker: &str) -> Option<&'static InstrumentProfile> {
    INSTRUMENTS
        .iter()
        .find(|i| i.ticker == ticker)
        .map(|i| &i.profile)
}
