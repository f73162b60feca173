//! Peer-evaluation pairing synchronization.
//!
//! Advisers declare, through a checkbox matrix, which of their teams
//! evaluates which other team. This crate reconciles that matrix against
//! the persisted pairing relation with a minimal insert/delete diff and
//! projects the persisted state back into the matrix for rendering.

pub mod db;
pub mod logging;
pub mod model;
pub mod pairing;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::pair::{Pair, PairValidationError};
pub use model::team::{AdviserGroup, AdviserId, ProjectLevel, TeamId, TeamSummary};
pub use pairing::diff::{diff_pairings, PairingDiff};
pub use pairing::matrix::{checked_pairs, pivot_matrix, PairingMatrix};
pub use pairing::parse::{parse_desired_state, parse_desired_state_keyed_by, ParseOutcome, RawForm};
pub use pairing::Pivot;
pub use repo::error::{RepoError, RepoResult};
pub use repo::pairing_repo::{ApplyOutcome, PairingRepository, SqlitePairingRepository};
pub use repo::team_repo::{SqliteTeamRepository, TeamRepository};
pub use service::pairing_service::{
    PairingPage, PairingService, PairingServiceError, PairingServiceResult, SyncReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
