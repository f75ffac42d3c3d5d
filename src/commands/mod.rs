pub mod snapshot;
pub mod stream;
pub mod tickers;
