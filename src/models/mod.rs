mod ohlcv;
mod period;
mod profile;
mod selection;
pub mod indicators;

pub use indicators::{IndicatorSeries, SmaConfig};
pub use ohlcv::OhlcvPoint;
pub use period::ChartPeriod;
pub use profile::{lookup_profile, Instrument, InstrumentProfile, INSTRUMENTS};
pub use selection::{DateRange, Selection};

/// Time series for the active selection
pub type Series = Vec<OhlcvPoint>;
