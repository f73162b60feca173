//! SQLite storage bootstrap for the pairing relation.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by pairing repositories.
//! - Bring `teams` and `team_evaluation_pairs` up to the schema this
//!   binary understands before any repository touches them.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A database written by a newer binary is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory, SCHEMA_VERSION};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the pairing database.
#[derive(Debug)]
pub enum DbError {
    /// Connection-level SQLite failure outside schema upgrades.
    Sqlite(rusqlite::Error),
    /// One schema step failed; steps before it stay applied.
    SchemaStep {
        version: u32,
        step: &'static str,
        source: rusqlite::Error,
    },
    /// The pairing tables carry a schema version this binary predates.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaStep {
                version,
                step,
                source,
            } => write!(f, "pairing schema step {version} ({step}) failed: {source}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "teams/team_evaluation_pairs schema is at version {found}, this build supports up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::SchemaStep { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
