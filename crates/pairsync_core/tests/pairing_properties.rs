//! Exhaustive checks of the diff engine over every pair of subsets of a
//! three-team universe (64 x 64 combinations).

use pairsync_core::{
    diff_pairings, parse_desired_state, pivot_matrix, AdviserGroup, Pair, Pivot, RawForm,
};
use std::collections::BTreeSet;

fn subsets(universe: &BTreeSet<Pair>) -> Vec<BTreeSet<Pair>> {
    let items: Vec<Pair> = universe.iter().copied().collect();
    (0..(1_u32 << items.len()))
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(idx, _)| mask & (1 << idx) != 0)
                .map(|(_, pair)| *pair)
                .collect()
        })
        .collect()
}

/// Renders a desired state the way the evaluator-keyed page submits it.
fn as_form(group: &AdviserGroup, desired: &BTreeSet<Pair>) -> RawForm {
    group
        .team_ids()
        .map(|team_id| {
            let values = desired
                .iter()
                .filter(|pair| pair.evaluator() == *team_id)
                .map(|pair| pair.evaluatee().to_string())
                .collect();
            (team_id.to_string(), values)
        })
        .collect()
}

#[test]
fn diff_is_plain_set_difference() {
    let group = AdviserGroup::new(1, [1, 2, 3]);
    let universe = group.candidate_universe();
    let all = subsets(&universe);
    assert_eq!(all.len(), 64);

    for current in &all {
        for desired in &all {
            let diff = diff_pairings(&universe, current, desired);
            let expected_insert: BTreeSet<Pair> = desired.difference(current).copied().collect();
            let expected_delete: BTreeSet<Pair> = current.difference(desired).copied().collect();
            assert_eq!(diff.to_insert, expected_insert);
            assert_eq!(diff.to_delete, expected_delete);
            assert!(diff.to_insert.is_disjoint(&diff.to_delete));
        }
    }
}

#[test]
fn second_diff_after_sync_is_empty() {
    let group = AdviserGroup::new(1, [1, 2, 3]);
    let universe = group.candidate_universe();
    let all = subsets(&universe);

    for current in &all {
        for desired in &all {
            let diff = diff_pairings(&universe, current, desired);
            let mut synced = current.clone();
            synced.extend(diff.to_insert.iter().copied());
            for pair in &diff.to_delete {
                synced.remove(pair);
            }
            assert_eq!(&synced, desired);
            assert!(diff_pairings(&universe, &synced, desired).is_empty());
        }
    }
}

#[test]
fn form_round_trip_reproduces_every_desired_state() {
    let group = AdviserGroup::new(1, [1, 2, 3]);
    for desired in subsets(&group.candidate_universe()) {
        assert_eq!(parse_desired_state(&as_form(&group, &desired), &group), desired);
    }
}

#[test]
fn no_self_pairs_survive_hostile_forms() {
    let group = AdviserGroup::new(1, [1, 2, 3]);
    let hostile: RawForm = [
        ("1", vec!["1", "2", "-1", "+3"]),
        ("2", vec!["2", "2", "9"]),
        ("3", vec!["3", " 1", "1.0"]),
        ("0", vec!["1"]),
        ("", vec!["2"]),
    ]
    .into_iter()
    .map(|(key, values)| {
        (
            key.to_string(),
            values.into_iter().map(str::to_string).collect(),
        )
    })
    .collect();

    let desired = parse_desired_state(&hostile, &group);
    assert!(desired.iter().all(|pair| pair.evaluator() != pair.evaluatee()));
    assert!(desired.iter().all(|pair| group.covers(pair)));
    assert_eq!(
        desired,
        [Pair::new(1, 2).unwrap(), Pair::new(1, 3).unwrap()]
            .into_iter()
            .collect()
    );

    let matrix = pivot_matrix(&desired, &group, Pivot::ByEvaluator);
    assert!(matrix.iter().all(|(outer, row)| !row.contains_key(outer)));
}
