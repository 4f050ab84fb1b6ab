//! Core types and configuration for the median-oracle system.
//!
//! This crate provides shared types used across all other crates:
//! - Tick and timestamp units
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, OracleConfig, ReplayConfig};
pub use error::{OracleError, Result};
pub use types::*;
