//! Replay a crawled swap history through the median oracle and print the
//! per-step aggregates as CSV on stdout.
//!
//! Usage: `replay [config.json]`; if no argument is given, the built-in
//! defaults are used. Logging goes to stderr, controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use oracle_core::Config;
use oracle_replay::{driver::ReplayDriver, feed, report, SwapSource};

fn load_config() -> Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    config.validate()?;

    let source = SwapSource::open(&config.replay.db_path)?;
    let swaps = source.load(
        &config.replay.pool,
        config.replay.from_block,
        config.replay.to_block,
    )?;
    info!(
        swaps = swaps.len(),
        pool = %config.replay.pool,
        "loaded swap history"
    );

    let events = feed::normalize(&swaps, config.replay.min_time_step_secs);
    info!(events = events.len(), "normalized event stream");

    let mut driver = ReplayDriver::new(&config)?;
    let result = driver.run(&events)?;

    report::write_csv(std::io::stdout().lock(), &result.rows)?;

    let summary = result.summary;
    info!(
        rows = summary.rows,
        skipped = summary.skipped,
        full_windows = summary.full_windows,
        dup_ticks = summary.dup_ticks,
        zero_duration_updates = summary.zero_duration_updates,
        quiet_steps = summary.quiet_steps,
        "replay complete"
    );

    Ok(())
}
