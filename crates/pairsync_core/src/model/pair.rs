//! Ordered evaluation pair.
//!
//! # Invariants
//! - `evaluator != evaluatee`, enforced by the only constructor.
//! - Both team ids are positive.

use crate::model::team::TeamId;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a pair cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairValidationError {
    /// Evaluator and evaluatee are the same team.
    SelfPair(TeamId),
    /// One side carries a zero or negative team id.
    NonPositiveTeamId(TeamId),
}

impl Display for PairValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfPair(team_id) => write!(f, "team {team_id} cannot evaluate itself"),
            Self::NonPositiveTeamId(team_id) => {
                write!(f, "team id must be positive, got {team_id}")
            }
        }
    }
}

impl Error for PairValidationError {}

/// "Evaluator team reviews evaluatee team."
///
/// The tuple is the identity; ordering is lexicographic on
/// `(evaluator, evaluatee)` so sets of pairs iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pair {
    evaluator: TeamId,
    evaluatee: TeamId,
}

impl Pair {
    /// Builds a pair, rejecting self-evaluation and non-positive ids.
    pub fn new(evaluator: TeamId, evaluatee: TeamId) -> Result<Self, PairValidationError> {
        for team_id in [evaluator, evaluatee] {
            if team_id <= 0 {
                return Err(PairValidationError::NonPositiveTeamId(team_id));
            }
        }
        if evaluator == evaluatee {
            return Err(PairValidationError::SelfPair(evaluator));
        }
        Ok(Self {
            evaluator,
            evaluatee,
        })
    }

    pub fn evaluator(&self) -> TeamId {
        self.evaluator
    }

    pub fn evaluatee(&self) -> TeamId {
        self.evaluatee
    }

    /// Returns whether `team_id` sits on either side of this pair.
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.evaluator == team_id || self.evaluatee == team_id
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} -> {})", self.evaluator, self.evaluatee)
    }
}
