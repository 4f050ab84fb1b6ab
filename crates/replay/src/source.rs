//! SQLite swap source.
//!
//! Reads timestamped swap ticks for one pool out of the crawler database,
//! ordered by block and log index.

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};

use oracle_core::Tick;

/// One swap event joined with its block timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRow {
    /// Block the swap landed in.
    pub block_number: i64,
    /// Position of the swap inside the block.
    pub log_index: i64,
    /// Block timestamp, seconds.
    pub timestamp: u64,
    /// Pool tick after the swap.
    pub tick: Tick,
}

/// Read-only handle on the swap-crawl database.
pub struct SwapSource {
    conn: Connection,
}

impl SwapSource {
    /// Open the database read-only.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("opening swap database {path}"))?;
        Ok(Self { conn })
    }

    /// Load all swaps for `pool` strictly between the two block numbers.
    pub fn load(&self, pool: &str, from_block: i64, to_block: i64) -> Result<Vec<SwapRow>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT s.blockNumber, s.logIndex, b.timestamp, s.tick
                 FROM Swap s
                 JOIN Block b ON s.blockNumber = b.blockNumber
                 WHERE s.pairName = ?1
                   AND s.blockNumber > ?2 AND s.blockNumber < ?3
                 ORDER BY s.blockNumber ASC, s.logIndex ASC",
            )
            .context("preparing swap query")?;

        let rows = stmt
            .query_map((pool, from_block, to_block), |row| {
                Ok(SwapRow {
                    block_number: row.get(0)?,
                    log_index: row.get(1)?,
                    timestamp: row.get::<_, i64>(2)? as u64,
                    tick: row.get(3)?,
                })
            })
            .context("querying swaps")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("reading swap rows")?;

        Ok(rows)
    }
}
