//! The live stock feed
//!
//! [`StockFeed`] owns the active selection's state: the versioned series,
//! the derived indicator map, and the SMA configuration set. Cold loads
//! replace the series wholesale; the live worker advances the tail one
//! tick at a time. Every change bumps the version and re-emits a
//! [`FeedEvent`] on a broadcast channel that consumers subscribe to.
//!
//! At most one live worker runs per feed. Changing the selection aborts
//! and awaits the previous worker before the new series is installed, so
//! a stale timer can never mutate a series that is no longer displayed.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::constants::LOAD_FAILURE_MESSAGE;
use crate::error::{AppError, Result};
use crate::models::indicators::{calculate_sma, default_sma_configs};
use crate::models::{lookup_profile, IndicatorSeries, OhlcvPoint, Selection, Series, SmaConfig};
use crate::services::clock::Clock;
use crate::services::generator::update_live_point;
use crate::services::market_hours::MarketHours;
use crate::services::resolver::SelectionResolver;
use crate::services::series_builder::SeriesBuilder;
use crate::worker;

/// Latest-point summary shown next to the chart
#[derive(Debug, Clone, Serialize)]
pub struct PriceUpdate {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Latest value of each enabled SMA; `None` while the window has no
    /// fully-computed value yet
    pub sma_values: BTreeMap<u32, Option<f64>>,
}

/// Snapshot emitted on every cold load and every applied live tick
#[derive(Debug, Clone, Serialize)]
pub struct FeedEvent {
    pub series: Series,
    pub indicators: IndicatorSeries,
    pub version: u64,
    pub price: Option<PriceUpdate>,
    pub error: Option<String>,
}

struct FeedState {
    selection: Option<Selection>,
    series: Series,
    version: u64,
    sma_configs: Vec<SmaConfig>,
    indicators: IndicatorSeries,
    error: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            selection: None,
            series: Vec::new(),
            version: 0,
            sma_configs: default_sma_configs(),
            indicators: IndicatorSeries::new(),
            error: None,
        }
    }
}

impl FeedState {
    fn to_event(&self) -> FeedEvent {
        FeedEvent {
            series: self.series.clone(),
            indicators: self.indicators.clone(),
            version: self.version,
            price: self.price_update(),
            error: self.error.clone(),
        }
    }

    fn price_update(&self) -> Option<PriceUpdate> {
        let last = self.series.last()?;
        let mut sma_values = BTreeMap::new();
        for config in self.sma_configs.iter().filter(|c| c.enabled) {
            let value = self
                .indicators
                .get(&config.period)
                .and_then(|values| values.last())
                .copied();
            sma_values.insert(config.period, value);
        }
        Some(PriceUpdate {
            open: last.open,
            high: last.high,
            low: last.low,
            close: last.close,
            volume: last.volume,
            sma_values,
        })
    }

    fn recompute_indicators(&mut self) {
        self.indicators = compute_indicators(&self.series, &self.sma_configs);
    }
}

/// One SMA vector per enabled config, each aligned with the series
pub fn compute_indicators(series: &[OhlcvPoint], configs: &[SmaConfig]) -> IndicatorSeries {
    let closes: Vec<f64> = series.iter().map(|p| p.close).collect();
    let mut map = IndicatorSeries::new();
    for config in configs.iter().filter(|c| c.enabled) {
        map.insert(config.period, calculate_sma(&closes, config.period as usize));
    }
    map
}

pub struct StockFeed {
    state: RwLock<FeedState>,
    events: broadcast::Sender<FeedEvent>,
    clock: Arc<dyn Clock>,
    hours: MarketHours,
    tick_interval: Duration,
    live_task: Mutex<Option<JoinHandle<()>>>,
    // Handle to ourselves for spawning the live worker
    weak: Weak<StockFeed>,
}

impl StockFeed {
    pub fn new(clock: Arc<dyn Clock>, hours: MarketHours, tick_interval: Duration) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new_cyclic(|weak| Self {
            state: RwLock::new(FeedState::default()),
            events,
            clock,
            hours,
            tick_interval,
            live_task: Mutex::new(None),
            weak: weak.clone(),
        })
    }

    /// Receiver for feed snapshots. Delivery is fire-and-forget: lagging
    /// subscribers drop events and the feed never blocks on them.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.events.subscribe()
    }

    /// Current state as an event, without waiting for the next emission
    pub async fn snapshot(&self) -> FeedEvent {
        self.state.read().await.to_event()
    }

    /// Whether a live worker is currently attached
    pub async fn live_task_running(&self) -> bool {
        self.live_task.lock().await.is_some()
    }

    /// Cold-load a new selection
    ///
    /// Stops the previous live worker, rebuilds the series, recomputes the
    /// indicator map, emits an event, and starts a fresh worker. A failed
    /// build degrades to an empty series with a user-visible message and
    /// leaves the feed without a worker.
    pub async fn load_selection(&self, selection: Selection) {
        self.stop_live_updates().await;

        let resolved = {
            let resolver = SelectionResolver::new(&*self.clock, &self.hours);
            let mut rng = rand::thread_rng();
            resolver.resolve(&mut rng, &selection)
        };

        let event = {
            let mut state = self.state.write().await;
            match resolved {
                Ok(series) => {
                    state.selection = Some(selection);
                    state.series = series;
                    state.version += 1;
                    state.error = None;
                    state.recompute_indicators();
                }
                Err(e) => {
                    warn!(error = %e, "Cold load failed");
                    state.selection = Some(selection);
                    state.series = Vec::new();
                    state.version += 1;
                    state.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                    state.recompute_indicators();
                }
            }
            state.to_event()
        };

        let loaded = event.error.is_none();
        self.emit(event);
        if loaded {
            self.start_live().await;
        }
    }

    /// Replace the indicator configuration set and recompute
    pub async fn set_sma_configs(&self, configs: Vec<SmaConfig>) {
        let event = {
            let mut state = self.state.write().await;
            state.sma_configs = configs;
            state.recompute_indicators();
            state.to_event()
        };
        self.emit(event);
    }

    /// Advance the feed by one live tick
    ///
    /// No-op outside market hours, on an empty series, for an unknown
    /// ticker, for a custom range not ending today, or while in the failed
    /// state. Otherwise the most recent point is replaced with a mutated
    /// copy, or a fresh bucket is materialized when the clock has crossed
    /// an hour/day boundary since the series was built. Returns whether
    /// the series changed.
    pub async fn advance_tick(&self) -> Result<bool> {
        let mut state = self.state.write().await;
        let Some(selection) = state.selection.clone() else {
            return Ok(false);
        };
        if state.error.is_some() || !self.should_update(&selection) {
            return Ok(false);
        }
        let Some(last) = state.series.last().cloned() else {
            return Ok(false);
        };
        let Some(profile) = lookup_profile(&selection.ticker) else {
            return Ok(false);
        };

        let mut rng = rand::thread_rng();
        let builder = SeriesBuilder::new(&*self.clock, &self.hours);

        let changed = if let Some(last_hour) = last.hour() {
            let current = self.hours.current_market_hour(&*self.clock);
            if current > last_hour {
                match builder.live_intraday_point(&mut rng, &selection.ticker, last.close) {
                    Some(point) => {
                        state.series.push(point);
                        true
                    }
                    None => false,
                }
            } else {
                let point = update_live_point(&mut rng, &last, profile.trend);
                *state.series.last_mut().expect("series non-empty") = point;
                true
            }
        } else {
            let last_date = last.date().ok_or_else(|| {
                AppError::Parse(format!("Unparseable point timestamp: {}", last.timestamp))
            })?;
            if self.hours.today(&*self.clock) > last_date {
                match builder.live_daily_point(&mut rng, &selection.ticker, last.close) {
                    Some(point) => {
                        state.series.push(point);
                        true
                    }
                    None => false,
                }
            } else {
                let point = update_live_point(&mut rng, &last, profile.trend);
                *state.series.last_mut().expect("series non-empty") = point;
                true
            }
        };

        if changed {
            state.version += 1;
            state.recompute_indicators();
            let event = state.to_event();
            drop(state);
            self.emit(event);
        }
        Ok(changed)
    }

    /// Abort the live worker and wait for it to finish
    pub async fn stop_live_updates(&self) {
        let handle = self.live_task.lock().await.take();
        if let Some(handle) = handle {
            handle.abort();
            match handle.await {
                Ok(_) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => warn!("Live worker ended abnormally: {}", e),
            }
        }
    }

    async fn start_live(&self) {
        let Some(feed) = self.weak.upgrade() else {
            return;
        };
        let interval = self.tick_interval;
        let handle = tokio::spawn(async move {
            worker::live_worker::run(feed, interval).await;
        });
        *self.live_task.lock().await = Some(handle);
    }

    /// Live-eligibility of the active selection, evaluated fresh per tick
    fn should_update(&self, selection: &Selection) -> bool {
        if let Some(range) = selection.active_range() {
            range.end == self.hours.today(&*self.clock) && self.hours.is_open(&*self.clock)
        } else {
            self.hours.is_open(&*self.clock)
        }
    }

    fn emit(&self, event: FeedEvent) {
        // No receivers is fine; the feed never depends on its listeners
        let _ = self.events.send(event);
    }
}
