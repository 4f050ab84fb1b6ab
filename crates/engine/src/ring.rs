//! Fixed-capacity ring buffer of price observations.
//!
//! Stores (value, duration) records newest-last with FIFO eviction once the
//! capacity is reached. Evicted history is gone for good, which is what
//! bounds query cost and caps the maximum answerable window.

use oracle_core::{DurationSecs, Observation};

/// Bounded FIFO store of observations backed by a fixed arena.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Arena; never grows past `capacity`.
    records: Vec<Observation>,
    /// Maximum number of records retained.
    capacity: usize,
    /// Next write slot once the arena is full.
    next: usize,
    /// Running sum of all stored durations.
    total_duration: DurationSecs,
}

impl RecordStore {
    /// Create an empty store with the given capacity.
    ///
    /// Capacity must be non-zero; the engine validates this at construction.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
            next: 0,
            total_duration: 0,
        }
    }

    /// Append a record, evicting the single oldest one if full. O(1).
    pub fn push(&mut self, value: i32, duration: DurationSecs) {
        let record = Observation::new(value, duration);
        if self.records.len() < self.capacity {
            self.records.push(record);
        } else {
            let evicted = std::mem::replace(&mut self.records[self.next], record);
            self.total_duration -= evicted.duration;
        }
        self.next = (self.next + 1) % self.capacity;
        self.total_duration += duration;
    }

    /// Iterate records from most to least recent. Does not mutate the store.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Observation> + '_ {
        let len = self.records.len();
        (0..len).map(move |i| {
            let idx = (self.next + self.capacity - 1 - i) % self.capacity;
            &self.records[idx]
        })
    }

    /// Sum of all stored durations. O(1).
    #[inline]
    pub fn total_duration(&self) -> DurationSecs {
        self.total_duration
    }

    /// Number of stored records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Configured capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
