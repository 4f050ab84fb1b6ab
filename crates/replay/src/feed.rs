//! Event normalization ahead of the engine.
//!
//! The engine accepts at most one update per timestamp, so the driver owns
//! deduplication: swaps within one block collapse to the last one. Long
//! quiet spans are padded with synthetic repeats of the previous tick so
//! medians and EMAs keep moving through inactive stretches.

use oracle_core::{Tick, Timestamp};

use crate::source::SwapRow;

/// One event fed to the replay loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// Event timestamp, seconds.
    pub timestamp: Timestamp,
    /// Observed tick; `None` means time passed with no new price, in which
    /// case the engine is not called at all.
    pub tick: Option<Tick>,
    /// Whether this event was inserted by gap filling.
    pub synthetic: bool,
}

impl TickEvent {
    /// A real observed price.
    pub fn observed(timestamp: Timestamp, tick: Tick) -> Self {
        Self {
            timestamp,
            tick: Some(tick),
            synthetic: false,
        }
    }

    /// Time passing without a price.
    pub fn quiet(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            tick: None,
            synthetic: false,
        }
    }
}

/// Collapse multiple swaps per block to the last one.
///
/// Within a block all swaps share a timestamp; only the final tick governs
/// from that instant onward.
pub fn dedup_last_in_block(rows: &[SwapRow]) -> Vec<SwapRow> {
    let mut out: Vec<SwapRow> = Vec::with_capacity(rows.len());
    for &row in rows {
        match out.last_mut() {
            Some(last) if last.block_number == row.block_number => *last = row,
            _ => out.push(row),
        }
    }
    out
}

/// Insert synthetic repeats of the previous tick whenever the gap between
/// consecutive rows exceeds `min_time_step` seconds. Zero disables filling.
pub fn fill_gaps(rows: &[SwapRow], min_time_step: u64) -> Vec<TickEvent> {
    let mut events: Vec<TickEvent> = Vec::with_capacity(rows.len());
    for &row in rows {
        if min_time_step > 0 {
            if let Some(prev) = events.last().copied() {
                let mut ts = prev.timestamp;
                while row.timestamp.saturating_sub(ts) > min_time_step {
                    ts += min_time_step;
                    events.push(TickEvent {
                        timestamp: ts,
                        tick: prev.tick,
                        synthetic: true,
                    });
                }
            }
        }
        events.push(TickEvent::observed(row.timestamp, row.tick));
    }
    events
}

/// Full normalization pipeline: dedup, then gap filling.
pub fn normalize(rows: &[SwapRow], min_time_step: u64) -> Vec<TickEvent> {
    fill_gaps(&dedup_last_in_block(rows), min_time_step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(block_number: i64, log_index: i64, timestamp: u64, tick: Tick) -> SwapRow {
        SwapRow {
            block_number,
            log_index,
            timestamp,
            tick,
        }
    }

    #[test]
    fn test_dedup_keeps_last_swap_per_block() {
        let rows = vec![
            row(1, 0, 100, 10),
            row(1, 3, 100, 20),
            row(1, 7, 100, 30),
            row(2, 1, 113, 40),
        ];
        let deduped = dedup_last_in_block(&rows);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].tick, 30);
        assert_eq!(deduped[1].tick, 40);
    }

    #[test]
    fn test_fill_gaps_inserts_repeats() {
        let rows = vec![row(1, 0, 0, 10), row(2, 0, 3000, 20)];
        let events = fill_gaps(&rows, 900);

        let timestamps: Vec<u64> = events.iter().map(|e| e.timestamp).collect();
        assert_eq!(timestamps, vec![0, 900, 1800, 2700, 3000]);

        // Synthetic events repeat the previous tick.
        for event in &events[1..4] {
            assert!(event.synthetic);
            assert_eq!(event.tick, Some(10));
        }
        assert!(!events[4].synthetic);
        assert_eq!(events[4].tick, Some(20));
    }

    #[test]
    fn test_fill_gaps_leaves_tight_sequences_alone() {
        let rows = vec![row(1, 0, 0, 10), row(2, 0, 500, 20), row(3, 0, 900, 30)];
        let events = fill_gaps(&rows, 900);
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| !e.synthetic));
    }

    #[test]
    fn test_zero_step_disables_filling() {
        let rows = vec![row(1, 0, 0, 10), row(2, 0, 100_000, 20)];
        let events = fill_gaps(&rows, 0);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_normalize_pipeline() {
        let rows = vec![
            row(1, 0, 0, 10),
            row(1, 1, 0, 15),
            row(2, 0, 2000, 20),
        ];
        let events = normalize(&rows, 900);
        let timestamps: Vec<u64> = events.iter().map(|e| e.timestamp).collect();
        assert_eq!(timestamps, vec![0, 900, 1800, 2000]);
        assert_eq!(events[0].tick, Some(15)); // last-in-block won
        assert_eq!(events[1].tick, Some(15));
    }
}
