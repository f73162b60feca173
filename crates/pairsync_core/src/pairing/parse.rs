//! Desired-state parsing for submitted checkbox forms.
//!
//! Malformed input is dropped at the smallest granularity: an invalid key
//! drops its whole entry, an invalid value drops only itself. Nothing here
//! fails the submission.

use crate::model::pair::Pair;
use crate::model::team::{AdviserGroup, TeamId};
use crate::pairing::Pivot;
use std::collections::{BTreeSet, HashMap};

/// Form body as delivered by the HTTP layer: key -> repeated values.
pub type RawForm = HashMap<String, Vec<String>>;

/// Parsed desired state plus counts of what was discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub desired: BTreeSet<Pair>,
    /// Keys that were not an integer id of a group member.
    pub dropped_keys: usize,
    /// Values that were not a group member, or named the key's own team.
    /// Values under dropped keys are not counted.
    pub dropped_values: usize,
}

/// Parses a form keyed by evaluator team ids whose values are evaluatees.
pub fn parse_desired_state(form: &RawForm, group: &AdviserGroup) -> BTreeSet<Pair> {
    parse_desired_state_keyed_by(form, group, Pivot::ByEvaluator).desired
}

/// Parses a form whose keys name the `keyed_by` side of each pair.
///
/// A group member absent from the form contributes no pairs, the same as a
/// key present with no valid values.
pub fn parse_desired_state_keyed_by(
    form: &RawForm,
    group: &AdviserGroup,
    keyed_by: Pivot,
) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (key, values) in form {
        let Some(outer) = member_team_id(key, group) else {
            outcome.dropped_keys += 1;
            continue;
        };

        for value in values {
            let pair = member_team_id(value, group)
                .and_then(|inner| keyed_by.pair(outer, inner).ok());
            match pair {
                Some(pair) => {
                    outcome.desired.insert(pair);
                }
                None => outcome.dropped_values += 1,
            }
        }
    }

    outcome
}

fn member_team_id(raw: &str, group: &AdviserGroup) -> Option<TeamId> {
    raw.parse::<TeamId>()
        .ok()
        .filter(|team_id| group.contains(*team_id))
}
