use std::sync::Arc;

use chrono::NaiveDate;

use crate::constants::DATE_FORMAT;
use crate::error::{AppError, Result};
use crate::models::{ChartPeriod, Selection};
use crate::services::{MarketHours, StockFeed, SystemClock};
use crate::utils::get_live_tick_interval;

pub async fn run(ticker: String, period: String, start: Option<String>, end: Option<String>) {
    let selection = match build_selection(ticker, &period, start, end) {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let feed = StockFeed::new(
        Arc::new(SystemClock),
        MarketHours::from_env(),
        get_live_tick_interval(),
    );
    feed.load_selection(selection).await;
    // One-shot output; no live worker needed past the cold load
    feed.stop_live_updates().await;

    let event = feed.snapshot().await;
    match serde_json::to_string_pretty(&event) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("❌ Failed to encode snapshot: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_selection(
    ticker: String,
    period: &str,
    start: Option<String>,
    end: Option<String>,
) -> Result<Selection> {
    match (start, end) {
        (Some(start), Some(end)) => {
            let start = parse_date(&start)?;
            let end = parse_date(&end)?;
            Ok(Selection::custom_range(ticker, start, end))
        }
        (None, None) => {
            let period: ChartPeriod = period.parse()?;
            Ok(Selection::period(ticker, period))
        }
        _ => Err(AppError::InvalidInput(
            "--start and --end must be given together".to_string(),
        )),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value, DATE_FORMAT)?)
}
