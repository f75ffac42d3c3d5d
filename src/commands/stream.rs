use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::models::{ChartPeriod, Selection};
use crate::services::{FeedEvent, MarketHours, StockFeed, SystemClock};
use crate::utils::get_live_tick_interval;

pub async fn run(ticker: String, period: String) {
    let period: ChartPeriod = match period.parse() {
        Ok(period) => period,
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
    let mut rx = feed.subscribe();

    println!("📡 Streaming {} ({}), press Ctrl-C to stop", ticker, period);
    feed.load_selection(Selection::period(ticker, period)).await;

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Stream fell behind the feed");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    feed.stop_live_updates().await;
}

fn print_event(event: &FeedEvent) {
    if let Some(error) = &event.error {
        eprintln!("❌ {}", error);
        return;
    }
    let Some(price) = &event.price else {
        println!("v{}: no data for this selection", event.version);
        return;
    };
    let Some(last) = event.series.last() else {
        return;
    };

    let smas: Vec<String> = price
        .sma_values
        .iter()
        .map(|(period, value)| match value {
            Some(v) => format!("SMA({}) {:.2}", period, v),
            None => format!("SMA({}) -", period),
        })
        .collect();

    println!(
        "v{} {} O {:.2} H {:.2} L {:.2} C {:.2} vol {} {} [{} pts]",
        event.version,
        last.timestamp,
        price.open,
        price.high,
        price.low,
        price.close,
        price.volume,
        smas.join(" "),
        event.series.len(),
    );
}
