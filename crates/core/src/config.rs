//! Configuration structures for the median-oracle system.

use serde::{Deserialize, Serialize};

use crate::error::{OracleError, Result};

/// Denominator of the Q16 fixed-point EMA smoothing constants.
pub const ALPHA_ONE_Q16: u32 = 1 << 16;

/// Main configuration for the oracle system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Oracle engine configuration.
    pub oracle: OracleConfig,
    /// Historical replay configuration.
    pub replay: ReplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oracle: OracleConfig::default(),
            replay: ReplayConfig::default(),
        }
    }
}

impl Config {
    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.oracle.validate()?;
        self.replay.validate()
    }
}

/// Oracle engine configuration.
///
/// All knobs are fixed at construction time; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Ring buffer capacity: maximum number of buffered observations.
    pub ring_capacity: usize,
    /// Short EMA smoothing constant, Q16 numerator (denominator 65536).
    pub short_alpha_q16: u32,
    /// Long EMA smoothing constant, Q16 numerator. Must be below the short
    /// one so the short mean reacts faster.
    pub long_alpha_q16: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            ring_capacity: 144,
            short_alpha_q16: 8192, // 1/8
            long_alpha_q16: 1024,  // 1/64
        }
    }
}

impl OracleConfig {
    /// Validate engine parameters.
    pub fn validate(&self) -> Result<()> {
        if self.ring_capacity == 0 {
            return Err(OracleError::Uninitialized);
        }
        for (name, alpha) in [
            ("short_alpha_q16", self.short_alpha_q16),
            ("long_alpha_q16", self.long_alpha_q16),
        ] {
            if alpha == 0 || alpha > ALPHA_ONE_Q16 {
                return Err(OracleError::config(format!(
                    "{name} must be in (0, {ALPHA_ONE_Q16}], got {alpha}"
                )));
            }
        }
        if self.short_alpha_q16 <= self.long_alpha_q16 {
            return Err(OracleError::config(
                "short_alpha_q16 must exceed long_alpha_q16",
            ));
        }
        Ok(())
    }
}

/// Historical replay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Path to the swap-crawl SQLite database.
    pub db_path: String,
    /// Pool name, e.g. "USDC/WETH/3000".
    pub pool: String,
    /// First block (exclusive).
    pub from_block: i64,
    /// Last block (exclusive).
    pub to_block: i64,
    /// Requested aggregation window in seconds.
    pub window_secs: u64,
    /// Maximum quiet span before synthetic events are inserted (seconds).
    /// Zero disables gap filling.
    pub min_time_step_secs: u64,
    /// Decimal scaler between the two token denominations (e.g. 1e12 for
    /// USDC/WETH).
    pub decimal_scaler: f64,
    /// Whether reported prices are inverted (quote per base).
    pub invert_price: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            db_path: "crawl-uniswap/results.db".to_string(),
            pool: "USDC/WETH/3000".to_string(),
            from_block: 14_760_000,
            to_block: 14_765_000,
            window_secs: 1800,
            min_time_step_secs: 900,
            decimal_scaler: 1e12,
            invert_price: true,
        }
    }
}

impl ReplayConfig {
    /// Validate replay parameters.
    pub fn validate(&self) -> Result<()> {
        if self.window_secs == 0 {
            return Err(OracleError::config("window_secs must be positive"));
        }
        if self.from_block >= self.to_block {
            return Err(OracleError::config("from_block must precede to_block"));
        }
        if self.decimal_scaler <= 0.0 {
            return Err(OracleError::config("decimal_scaler must be positive"));
        }
        Ok(())
    }
}
