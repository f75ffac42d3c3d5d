use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::services::StockFeed;

/// Periodically advance the feed's most recent point
///
/// The tick itself decides whether anything changes (market hours, custom
/// range ending today, non-empty series); this loop only paces it and
/// swallows per-tick failures so a single bad tick never ends the session.
/// The feed aborts this task when the selection changes.
pub async fn run(feed: Arc<StockFeed>, interval: Duration) {
    info!(
        interval_secs = interval.as_secs(),
        "Live worker: starting updates"
    );

    let mut iteration = 0u64;

    loop {
        sleep(interval).await;
        iteration += 1;

        match feed.advance_tick().await {
            Ok(true) => {
                debug!(iteration, "Live worker: tick applied");
            }
            Ok(false) => {
                debug!(iteration, "Live worker: tick skipped");
            }
            Err(e) => {
                // Keep running; existing data stays intact
                warn!(iteration, error = %e, "Live worker: tick failed");
            }
        }
    }
}
