//! Checkbox-grid projection of the current pairing state.

use crate::model::pair::Pair;
use crate::model::team::{AdviserGroup, TeamId};
use crate::pairing::Pivot;
use std::collections::{BTreeMap, BTreeSet};

/// Outer team -> every other group member -> checked.
pub type PairingMatrix = BTreeMap<TeamId, BTreeMap<TeamId, bool>>;

/// Pivots `current` into a complete grid for `group`.
///
/// Every member gets a row with all `|group| - 1` partners, unchecked ones
/// included, so the rendered grid keeps a stable shape. Pairs in `current`
/// that fall outside the group are not shown.
pub fn pivot_matrix(current: &BTreeSet<Pair>, group: &AdviserGroup, by: Pivot) -> PairingMatrix {
    let mut matrix = PairingMatrix::new();
    for outer in group.team_ids().copied() {
        let row = group
            .partners_of(outer)
            .map(|inner| {
                let checked = by
                    .pair(outer, inner)
                    .map(|pair| current.contains(&pair))
                    .unwrap_or(false);
                (inner, checked)
            })
            .collect();
        matrix.insert(outer, row);
    }
    matrix
}

/// Collects the checked cells of a matrix back into pairs.
pub fn checked_pairs(matrix: &PairingMatrix, by: Pivot) -> BTreeSet<Pair> {
    matrix
        .iter()
        .flat_map(|(outer, row)| {
            row.iter()
                .filter(|(_, checked)| **checked)
                .filter_map(move |(inner, _)| by.pair(*outer, *inner).ok())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{checked_pairs, pivot_matrix};
    use crate::model::pair::Pair;
    use crate::model::team::AdviserGroup;
    use crate::pairing::Pivot;
    use std::collections::BTreeSet;

    #[test]
    fn by_evaluatee_rows_list_candidate_evaluators() {
        let group = AdviserGroup::new(1, [1, 2, 3]);
        let current = BTreeSet::from([Pair::new(2, 1).unwrap()]);
        let matrix = pivot_matrix(&current, &group, Pivot::ByEvaluatee);

        assert_eq!(matrix[&1].get(&2), Some(&true));
        assert_eq!(matrix[&1].get(&3), Some(&false));
        assert_eq!(matrix[&2].get(&1), Some(&false));
        assert!(matrix[&1].get(&1).is_none());
    }

    #[test]
    fn grid_is_complete_for_sparse_state() {
        let group = AdviserGroup::new(1, [4, 5, 6, 7]);
        let matrix = pivot_matrix(&BTreeSet::new(), &group, Pivot::ByEvaluator);
        assert_eq!(matrix.len(), 4);
        assert!(matrix.values().all(|row| row.len() == 3));
        assert!(matrix.values().flat_map(|row| row.values()).all(|v| !v));
    }

    #[test]
    fn checked_pairs_inverts_either_pivot() {
        let group = AdviserGroup::new(1, [1, 2, 3]);
        let current = BTreeSet::from([Pair::new(1, 3).unwrap(), Pair::new(3, 2).unwrap()]);
        for pivot in [Pivot::ByEvaluatee, Pivot::ByEvaluator] {
            let matrix = pivot_matrix(&current, &group, pivot);
            assert_eq!(checked_pairs(&matrix, pivot), current);
        }
    }
}
