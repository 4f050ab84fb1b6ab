//! Replay loop.
//!
//! Feeds normalized events into the oracle engine one at a time and queries
//! the windowed aggregates and EMAs after every step, collecting report rows
//! plus the invariant counters the verification harness checks.

use anyhow::Result;
use chrono::DateTime;
use tracing::{debug, warn};

use oracle_core::{Config, OracleError, Tick};
use oracle_engine::OracleEngine;

use crate::feed::TickEvent;
use crate::report::{PriceScale, ReplayRow};

/// Counters accumulated across a replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Steps that produced a report row.
    pub rows: usize,
    /// Steps skipped because the engine had no readable history yet.
    pub skipped: usize,
    /// Reads that satisfied the full requested window.
    pub full_windows: usize,
    /// Updates repeating the previous tick verbatim.
    pub dup_ticks: usize,
    /// Price changes superseded within the same second.
    pub zero_duration_updates: usize,
    /// Quiet steps where the engine was not called.
    pub quiet_steps: usize,
}

/// Output of one replay run.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub rows: Vec<ReplayRow>,
    pub summary: ReplaySummary,
}

/// Drives one engine through a normalized event stream.
pub struct ReplayDriver {
    engine: OracleEngine,
    window_secs: u64,
    scale: PriceScale,
    prev_tick: Option<Tick>,
}

impl ReplayDriver {
    /// Build a driver (and its engine) from validated configuration.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: OracleEngine::new(&config.oracle)?,
            window_secs: config.replay.window_secs,
            scale: PriceScale {
                decimal_scaler: config.replay.decimal_scaler,
                invert: config.replay.invert_price,
            },
            prev_tick: None,
        })
    }

    /// Replay the events in order, querying after every step.
    pub fn run(&mut self, events: &[TickEvent]) -> Result<ReplayReport> {
        let mut rows = Vec::with_capacity(events.len());
        let mut summary = ReplaySummary::default();

        for event in events {
            match event.tick {
                Some(tick) => {
                    if self.prev_tick == Some(tick) {
                        summary.dup_ticks += 1;
                    } else if self.engine.last_timestamp() == Some(event.timestamp) {
                        // A different price superseded within the same second:
                        // the outgoing record carries zero weight.
                        summary.zero_duration_updates += 1;
                    }
                    self.engine.update(tick, event.timestamp)?;
                    self.prev_tick = Some(tick);
                }
                None => {
                    // Time passes without an update; the engine only learns
                    // of it through the next update's duration.
                    summary.quiet_steps += 1;
                }
            }

            let window = match self.engine.read(self.window_secs) {
                Ok(window) => window,
                Err(OracleError::Uninitialized) | Err(OracleError::EmptyHistory) => {
                    debug!(timestamp = event.timestamp, "no readable history yet");
                    summary.skipped += 1;
                    continue;
                }
                Err(err) => {
                    warn!(timestamp = event.timestamp, %err, "read failed");
                    return Err(err.into());
                }
            };
            let emas = self.engine.emas()?;

            if window.actual_age == self.window_secs {
                summary.full_windows += 1;
            }

            let time_utc = DateTime::from_timestamp(event.timestamp as i64, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_default();

            rows.push(ReplayRow {
                timestamp: event.timestamp,
                time_utc,
                tick: event.tick,
                actual_age: window.actual_age,
                median: window.median,
                mean: window.mean,
                short_mean: emas.short_mean,
                long_mean: emas.long_mean,
                spot_price: event.tick.map(|t| self.scale.tick_to_price(t)),
                median_price: self.scale.internal_to_price(window.median),
                mean_price: self.scale.internal_to_price(window.mean),
                short_ema_price: self.scale.internal_to_price(emas.short_mean),
                long_ema_price: self.scale.internal_to_price(emas.long_mean),
            });
            summary.rows += 1;
        }

        Ok(ReplayReport { rows, summary })
    }
}
