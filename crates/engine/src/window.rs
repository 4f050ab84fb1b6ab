//! Weighted median and mean over a requested time window.
//!
//! Reconstructs the duration-weighted statistics a naive per-second
//! expansion would produce, but touches each buffered record at most once:
//! work is bounded by the ring capacity, never by the window length.

use oracle_core::{DurationSecs, InternalTick, OracleError, Result, WindowSummary};

use crate::quantize;
use crate::ring::RecordStore;

/// A record's contribution to the current query, in internal units.
#[derive(Debug, Clone, Copy)]
struct WeightedSample {
    value: InternalTick,
    take: DurationSecs,
}

/// Aggregate the stored records over the last `requested_window` seconds.
///
/// The satisfied window is clamped to the buffered total duration; falling
/// short of the request degrades gracefully via `actual_age` rather than
/// erroring. Fails with `EmptyHistory` when no record carries any weight.
pub fn summarize(store: &RecordStore, requested_window: DurationSecs) -> Result<WindowSummary> {
    if store.is_empty() {
        return Err(OracleError::EmptyHistory);
    }

    let actual_age = requested_window.min(store.total_duration());
    if actual_age == 0 {
        // Records exist but all have zero duration; there is nothing to weigh.
        return Err(OracleError::EmptyHistory);
    }

    // Collect weighted samples newest to oldest until the window is covered.
    // Stored values are compact buckets; they are expanded back to internal
    // units here, before any averaging, so truncation happens at internal
    // resolution.
    let mut samples: Vec<WeightedSample> = Vec::with_capacity(store.len());
    let mut needed = actual_age;
    for record in store.iter_newest_first() {
        let take = record.duration.min(needed);
        if take > 0 {
            samples.push(WeightedSample {
                value: quantize::upscale(record.value),
                take,
            });
            needed -= take;
        }
        if needed == 0 {
            break;
        }
    }

    samples.sort_unstable_by_key(|s| s.value);

    // The samples stand in for an ascending sequence of `actual_age` values
    // (each repeated `take` times, never materialized). The median is the
    // element at 1-indexed position (actual_age + 1) / 2: the exact middle
    // for odd ages, the lower central element for even ages.
    let target = (actual_age + 1) / 2;
    let mut cumulative: DurationSecs = 0;
    let mut median = samples[0].value;
    for sample in &samples {
        cumulative += sample.take;
        if cumulative >= target {
            median = sample.value;
            break;
        }
    }

    let weighted_sum: i128 = samples
        .iter()
        .map(|s| s.value as i128 * s.take as i128)
        .sum();
    let mean = (weighted_sum / actual_age as i128) as i64;

    Ok(WindowSummary {
        actual_age,
        median,
        mean,
    })
}
