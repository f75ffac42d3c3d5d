pub mod clock;
pub mod feed;
pub mod generator;
pub mod market_hours;
pub mod resolver;
pub mod series_builder;

pub use clock::{Clock, FixedClock, SystemClock};
pub use feed::{compute_indicators, FeedEvent, PriceUpdate, StockFeed};
pub use market_hours::MarketHours;
pub use resolver::SelectionResolver;
pub use series_builder::SeriesBuilder;
