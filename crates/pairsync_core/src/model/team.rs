//! Team and adviser-group model.
//!
//! # Responsibility
//! - Describe the teams one adviser supervises.
//! - Build the candidate universe (`group x group` minus the diagonal).
//!
//! # Invariants
//! - Group membership is authoritative for validating both current and
//!   desired pairs.
//! - Membership is kept sorted so universes and matrices are deterministic.

use crate::model::pair::Pair;
use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque positive identifier of an evaluable team.
pub type TeamId = i64;

/// Internal identifier of an adviser role.
pub type AdviserId = i64;

/// Programme tier a team is enrolled in.
///
/// Declaration order is the display order used by the pairing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectLevel {
    Vostok,
    Gemini,
    Apollo,
    Artemis,
}

impl ProjectLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vostok => "vostok",
            Self::Gemini => "gemini",
            Self::Apollo => "apollo",
            Self::Artemis => "artemis",
        }
    }
}

impl Display for ProjectLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ProjectLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "vostok" => Ok(Self::Vostok),
            "gemini" => Ok(Self::Gemini),
            "apollo" => Ok(Self::Apollo),
            "artemis" => Ok(Self::Artemis),
            other => Err(format!("unknown project level `{other}`")),
        }
    }
}

/// Roster row shown next to each matrix line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_id: TeamId,
    pub team_name: Option<String>,
    pub project_level: ProjectLevel,
    pub student1_displayname: Option<String>,
    pub student2_displayname: Option<String>,
}

/// The set of teams supervised by one adviser at read time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdviserGroup {
    adviser_id: AdviserId,
    team_ids: BTreeSet<TeamId>,
}

impl AdviserGroup {
    pub fn new(adviser_id: AdviserId, team_ids: impl IntoIterator<Item = TeamId>) -> Self {
        Self {
            adviser_id,
            team_ids: team_ids.into_iter().collect(),
        }
    }

    pub fn adviser_id(&self) -> AdviserId {
        self.adviser_id
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.team_ids.contains(&team_id)
    }

    pub fn len(&self) -> usize {
        self.team_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.team_ids.is_empty()
    }

    /// Member ids in ascending order.
    pub fn team_ids(&self) -> btree_set::Iter<'_, TeamId> {
        self.team_ids.iter()
    }

    /// Returns whether both ends of `pair` belong to this group.
    pub fn covers(&self, pair: &Pair) -> bool {
        self.contains(pair.evaluator()) && self.contains(pair.evaluatee())
    }

    /// Every other member of the group, ascending.
    pub fn partners_of(&self, team_id: TeamId) -> impl Iterator<Item = TeamId> + '_ {
        self.team_ids
            .iter()
            .copied()
            .filter(move |other| *other != team_id)
    }

    /// Builds `{(a, b) : a, b in group, a != b}`.
    ///
    /// Holds exactly `n * (n - 1)` pairs for a group of `n` teams.
    pub fn candidate_universe(&self) -> BTreeSet<Pair> {
        let mut universe = BTreeSet::new();
        for evaluator in self.team_ids.iter().copied() {
            for evaluatee in self.partners_of(evaluator) {
                if let Ok(pair) = Pair::new(evaluator, evaluatee) {
                    universe.insert(pair);
                }
            }
        }
        universe
    }
}
