//! Minimal insert/delete reconciliation between current and desired state.

use crate::model::pair::Pair;
use serde::Serialize;
use std::collections::BTreeSet;

/// Pair sets that move the current state to the desired state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairingDiff {
    pub to_insert: BTreeSet<Pair>,
    pub to_delete: BTreeSet<Pair>,
}

impl PairingDiff {
    /// True when current already equals desired within the universe.
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }

    /// Pairs touched by the diff in either direction.
    pub fn touched(&self) -> impl Iterator<Item = &Pair> {
        self.to_insert.iter().chain(self.to_delete.iter())
    }
}

/// Computes `desired \ current` and `current \ desired`, restricted to
/// `universe`.
///
/// Group isolation is established upstream: `PairingRepository::read_current`
/// only returns pairs whose teams both belong to the group, and
/// `parse_desired_state` drops any key or value outside it. The `universe`
/// filter here is a second guard that keeps a caller bypassing those two
/// paths from touching another group's pairs.
pub fn diff_pairings(
    universe: &BTreeSet<Pair>,
    current: &BTreeSet<Pair>,
    desired: &BTreeSet<Pair>,
) -> PairingDiff {
    let to_insert = desired
        .iter()
        .filter(|pair| universe.contains(pair) && !current.contains(pair))
        .copied()
        .collect();
    let to_delete = current
        .iter()
        .filter(|pair| universe.contains(pair) && !desired.contains(pair))
        .copied()
        .collect();

    PairingDiff {
        to_insert,
        to_delete,
    }
}
