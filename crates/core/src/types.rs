//! Core data types for the median-oracle system.

use serde::{Deserialize, Serialize};

/// External log-price unit: one tick is a factor of 1.0001.
pub type Tick = i32;

/// Engine-internal log-price unit, using a finer logarithmic base
/// (1.000010576643810561) for compact fixed-point storage.
pub type InternalTick = i64;

/// Timestamp in seconds since Unix epoch.
pub type Timestamp = u64;

/// Elapsed time between two updates, in seconds.
pub type DurationSecs = u64;

/// A single buffered price observation.
///
/// `value` is the downscaled internal tick; `duration` is how long that value
/// remained in force before it was superseded by the next update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Downscaled internal tick (internal units / 256, half-bucket biased).
    pub value: i32,
    /// Seconds this value governed the price.
    pub duration: DurationSecs,
}

impl Observation {
    /// Create a new observation.
    #[inline]
    pub fn new(value: i32, duration: DurationSecs) -> Self {
        Self { value, duration }
    }
}

/// Result of a windowed read: the satisfied window plus its aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// Seconds of buffered history the query could actually cover.
    /// May be less than the requested window; that is not an error.
    pub actual_age: DurationSecs,
    /// Duration-weighted median, in internal units.
    pub median: InternalTick,
    /// Duration-weighted mean truncated toward zero, in internal units.
    pub mean: InternalTick,
}

/// Snapshot of the two exponential moving averages, in internal units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaSnapshot {
    /// Fast-reacting mean.
    pub short_mean: InternalTick,
    /// Slow-reacting mean.
    pub long_mean: InternalTick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_roundtrip() {
        let obs = Observation::new(-37, 900);
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, back);
    }
}
