//! Pure pairing synchronization engine.
//!
//! # Responsibility
//! - Turn a submitted checkbox matrix into a validated desired state.
//! - Compute the minimal insert/delete diff against the current state.
//! - Project the current state into the two checkbox-grid pivots.
//!
//! # Invariants
//! - Nothing in this module touches storage.
//! - Both pivots are served by the same parse/diff/matrix code; `Pivot`
//!   only decides which side of a pair the outer key names.

use crate::model::pair::{Pair, PairValidationError};
use crate::model::team::TeamId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod diff;
pub mod matrix;
pub mod parse;

/// Which side of a pair the outer key of a form or matrix names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pivot {
    /// Outer key is the evaluatee; inner entries are its evaluators.
    ByEvaluatee,
    /// Outer key is the evaluator; inner entries are its evaluatees.
    ByEvaluator,
}

impl Pivot {
    /// Builds the `(evaluator, evaluatee)` pair for an outer key and one of
    /// its inner partners.
    pub fn pair(&self, outer: TeamId, inner: TeamId) -> Result<Pair, PairValidationError> {
        match self {
            Self::ByEvaluatee => Pair::new(inner, outer),
            Self::ByEvaluator => Pair::new(outer, inner),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByEvaluatee => "evaluatee",
            Self::ByEvaluator => "evaluator",
        }
    }
}

impl Display for Pivot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pivot {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "evaluatee" | "by_evaluatee" => Ok(Self::ByEvaluatee),
            "evaluator" | "by_evaluator" => Ok(Self::ByEvaluator),
            other => Err(format!(
                "unsupported pivot `{other}`; expected evaluatee|evaluator"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Pivot;
    use crate::model::pair::Pair;

    #[test]
    fn pivot_orients_pairs() {
        assert_eq!(Pivot::ByEvaluator.pair(1, 2), Pair::new(1, 2));
        assert_eq!(Pivot::ByEvaluatee.pair(1, 2), Pair::new(2, 1));
    }

    #[test]
    fn pivot_parses_case_insensitively() {
        assert_eq!(" Evaluatee ".parse::<Pivot>(), Ok(Pivot::ByEvaluatee));
        assert_eq!("evaluator".parse::<Pivot>(), Ok(Pivot::ByEvaluator));
        assert!("mentor".parse::<Pivot>().is_err());
    }
}
