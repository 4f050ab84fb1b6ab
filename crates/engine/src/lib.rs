//! Time-weighted sliding-window price aggregation.
//!
//! This crate implements the oracle engine proper:
//! - Tick quantization between external and internal log bases
//! - Fixed-capacity ring buffer of (value, duration) observations
//! - Weighted median / weighted mean over an arbitrary window
//! - Short/long exponential moving averages
//! - The `OracleEngine` orchestrator exposing update/read/emas

pub mod ema;
pub mod engine;
pub mod quantize;
pub mod ring;
pub mod window;

pub use ema::EmaSet;
pub use engine::OracleEngine;
pub use ring::RecordStore;
