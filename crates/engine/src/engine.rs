//! Oracle engine orchestration.
//!
//! Ties the quantizer, ring buffer, window aggregator and EMA pair together
//! behind the update/read/emas operations. Single writer, fully synchronous:
//! every call either completes or rejects without touching state.

use oracle_core::{
    EmaSnapshot, OracleConfig, OracleError, Result, Tick, Timestamp, WindowSummary,
};
use tracing::{debug, trace};

use crate::ema::EmaSet;
use crate::quantize;
use crate::ring::RecordStore;
use crate::window;

/// Set once the first update arrives.
#[derive(Debug, Clone, Copy)]
struct WriterState {
    /// Timestamp of the last accepted update.
    last_timestamp: Timestamp,
    /// Downscaled internal tick currently in force.
    current_value: i32,
}

/// Time-weighted sliding-window price oracle.
pub struct OracleEngine {
    store: RecordStore,
    emas: EmaSet,
    state: Option<WriterState>,
}

impl OracleEngine {
    /// Create an uninitialized engine from validated configuration.
    pub fn new(config: &OracleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: RecordStore::new(config.ring_capacity),
            emas: EmaSet::new(config.short_alpha_q16, config.long_alpha_q16),
            state: None,
        })
    }

    /// Ingest a new observed price.
    ///
    /// The first call seeds the EMAs and the clock without pushing a record;
    /// there is no prior value to attribute a duration to. Every later call
    /// pushes one record carrying the previous value and the time it was in
    /// force. Repeated timestamps are legal and produce zero-duration
    /// records that never weigh into a window.
    pub fn update(&mut self, tick: Tick, timestamp: Timestamp) -> Result<()> {
        let internal = quantize::to_internal(tick);
        let compact = quantize::downscale(internal);

        match self.state {
            None => {
                self.emas.seed(internal);
                self.state = Some(WriterState {
                    last_timestamp: timestamp,
                    current_value: compact,
                });
                debug!(tick, timestamp, internal, "oracle seeded");
            }
            Some(prev) => {
                if timestamp < prev.last_timestamp {
                    return Err(OracleError::NonMonotonicTimestamp {
                        last: prev.last_timestamp,
                        got: timestamp,
                    });
                }
                let duration = timestamp - prev.last_timestamp;
                self.store.push(prev.current_value, duration);
                self.emas.update(internal);
                self.state = Some(WriterState {
                    last_timestamp: timestamp,
                    current_value: compact,
                });
                trace!(tick, timestamp, duration, "oracle updated");
            }
        }
        Ok(())
    }

    /// Weighted median and mean over the last `window` seconds, in internal
    /// units. The satisfied age is clamped to buffered history.
    pub fn read(&self, window: u64) -> Result<WindowSummary> {
        if self.state.is_none() {
            return Err(OracleError::Uninitialized);
        }
        window::summarize(&self.store, window)
    }

    /// Current short/long EMA values, in internal units.
    pub fn emas(&self) -> Result<EmaSnapshot> {
        if self.state.is_none() {
            return Err(OracleError::Uninitialized);
        }
        Ok(self.emas.snapshot())
    }

    /// Timestamp of the last accepted update, if any.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.state.map(|s| s.last_timestamp)
    }

    /// Number of buffered observation records.
    pub fn record_count(&self) -> usize {
        self.store.len()
    }

    /// Total buffered history in seconds.
    pub fn buffered_duration(&self) -> u64 {
        self.store.total_duration()
    }
}
