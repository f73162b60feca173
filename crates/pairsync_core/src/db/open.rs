//! Connection bootstrap and schema upgrades for SQLite.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`, so deleting a team
//!   cascades into its evaluation pairs.
//! - Each schema step commits together with its `user_version` bump, so an
//!   interrupted upgrade resumes at the first missing step.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// `(version, step name, sql)`, versions starting at 1 with no gaps.
const SCHEMA_STEPS: [(u32, &str, &str); 2] = [
    (
        1,
        "teams_and_pairs",
        include_str!("schema/0001_teams_and_pairs.sql"),
    ),
    (2, "pair_indexes", include_str!("schema/0002_pair_indexes.sql")),
];

/// Schema version written by this build once all steps are applied.
pub const SCHEMA_VERSION: u32 = SCHEMA_STEPS.len() as u32;

/// Opens a SQLite database file and upgrades the pairing schema.
///
/// Emits `db_open` events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database with the pairing schema in place.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = connect()
        .map_err(DbError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} schema_version={SCHEMA_VERSION} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    for (version, step, sql) in SCHEMA_STEPS.iter().skip(found as usize).copied() {
        apply_step(conn, version, sql).map_err(|source| DbError::SchemaStep {
            version,
            step,
            source,
        })?;
        info!("event=schema_step module=db status=ok version={version} step={step}");
    }
    Ok(())
}

fn apply_step(conn: &mut Connection, version: u32, sql: &str) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", version)?;
    tx.commit()
}
