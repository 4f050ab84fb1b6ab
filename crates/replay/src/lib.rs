//! Historical-data replay for the median oracle.
//!
//! This crate drives the engine with real-world swap history:
//! - SQLite swap source (crawler database)
//! - Event normalization (same-block dedup, quiet-span gap filling)
//! - The replay loop feeding updates and querying each step
//! - Price-space conversion and CSV report output

pub mod driver;
pub mod feed;
pub mod report;
pub mod source;

pub use driver::{ReplayDriver, ReplayReport, ReplaySummary};
pub use feed::TickEvent;
pub use source::{SwapRow, SwapSource};
