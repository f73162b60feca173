//! Pairing repository: scoped reads and idempotent batch writes over
//! `team_evaluation_pairs`.
//!
//! # Responsibility
//! - Read the current pairing state of one adviser group.
//! - Apply an insert/delete diff.
//! - Answer single-team lookups used by evaluation authorization.
//!
//! # Invariants
//! - `read_current` filters on both columns; a pair with only one end in
//!   the group is never returned.
//! - `apply` runs inserts (`INSERT OR IGNORE`) and exact-tuple deletes in
//!   one `IMMEDIATE` transaction.

use crate::model::pair::Pair;
use crate::model::team::{AdviserGroup, TeamId};
use crate::pairing::diff::PairingDiff;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::schema_guard::ensure_table;
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Transaction, TransactionBehavior};
use std::collections::BTreeSet;
use std::time::Instant;

const PAIR_COLUMNS: &[&str] = &["evaluator_team_id", "evaluatee_team_id"];

/// Rows actually changed by one `apply` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub inserted: usize,
    pub deleted: usize,
}

/// Storage contract for the evaluation pairing relation.
pub trait PairingRepository {
    /// Persisted pairs whose evaluator and evaluatee both belong to `group`.
    fn read_current(&self, group: &AdviserGroup) -> RepoResult<BTreeSet<Pair>>;
    /// Inserts `diff.to_insert` and deletes `diff.to_delete` atomically.
    fn apply(&self, diff: &PairingDiff) -> RepoResult<ApplyOutcome>;
    /// Returns whether `pair` is persisted.
    fn is_paired(&self, pair: &Pair) -> RepoResult<bool>;
    /// Teams that `evaluator` is assigned to review, ascending.
    fn evaluatees_of(&self, evaluator: TeamId) -> RepoResult<Vec<TeamId>>;
    /// Teams assigned to review `evaluatee`, ascending.
    fn evaluators_of(&self, evaluatee: TeamId) -> RepoResult<Vec<TeamId>>;
}

/// SQLite-backed pairing repository.
pub struct SqlitePairingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePairingRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "team_evaluation_pairs", PAIR_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl PairingRepository for SqlitePairingRepository<'_> {
    fn read_current(&self, group: &AdviserGroup) -> RepoResult<BTreeSet<Pair>> {
        if group.is_empty() {
            return Ok(BTreeSet::new());
        }

        let placeholders = vec!["?"; group.len()].join(", ");
        let sql = format!(
            "SELECT evaluator_team_id, evaluatee_team_id
             FROM team_evaluation_pairs
             WHERE evaluator_team_id IN ({placeholders})
               AND evaluatee_team_id IN ({placeholders})
             ORDER BY evaluator_team_id ASC, evaluatee_team_id ASC;"
        );
        let bind_values: Vec<Value> = group
            .team_ids()
            .chain(group.team_ids())
            .map(|team_id| Value::Integer(*team_id))
            .collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut pairs = BTreeSet::new();
        while let Some(row) = rows.next()? {
            let evaluator: TeamId = row.get(0)?;
            let evaluatee: TeamId = row.get(1)?;
            let pair = Pair::new(evaluator, evaluatee).map_err(|err| {
                RepoError::InvalidData(format!("team_evaluation_pairs row: {err}"))
            })?;
            pairs.insert(pair);
        }

        Ok(pairs)
    }

    fn apply(&self, diff: &PairingDiff) -> RepoResult<ApplyOutcome> {
        if diff.is_empty() {
            return Ok(ApplyOutcome::default());
        }

        let started_at = Instant::now();
        match apply_in_tx(self.conn, diff) {
            Ok(outcome) => {
                info!(
                    "event=pairs_apply module=repo status=ok planned_insert={} planned_delete={} inserted={} deleted={} duration_ms={}",
                    diff.to_insert.len(),
                    diff.to_delete.len(),
                    outcome.inserted,
                    outcome.deleted,
                    started_at.elapsed().as_millis()
                );
                Ok(outcome)
            }
            Err(err) => {
                error!(
                    "event=pairs_apply module=repo status=error planned_insert={} planned_delete={} duration_ms={} error={}",
                    diff.to_insert.len(),
                    diff.to_delete.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn is_paired(&self, pair: &Pair) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM team_evaluation_pairs
                WHERE evaluator_team_id = ?1
                  AND evaluatee_team_id = ?2
            );",
            params![pair.evaluator(), pair.evaluatee()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn evaluatees_of(&self, evaluator: TeamId) -> RepoResult<Vec<TeamId>> {
        load_team_ids(
            self.conn,
            "SELECT evaluatee_team_id
             FROM team_evaluation_pairs
             WHERE evaluator_team_id = ?1
             ORDER BY evaluatee_team_id ASC;",
            evaluator,
        )
    }

    fn evaluators_of(&self, evaluatee: TeamId) -> RepoResult<Vec<TeamId>> {
        load_team_ids(
            self.conn,
            "SELECT evaluator_team_id
             FROM team_evaluation_pairs
             WHERE evaluatee_team_id = ?1
             ORDER BY evaluator_team_id ASC;",
            evaluatee,
        )
    }
}

fn apply_in_tx(conn: &Connection, diff: &PairingDiff) -> RepoResult<ApplyOutcome> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let mut outcome = ApplyOutcome::default();

    {
        let mut insert = tx.prepare_cached(
            "INSERT OR IGNORE INTO team_evaluation_pairs (evaluator_team_id, evaluatee_team_id)
             VALUES (?1, ?2);",
        )?;
        for pair in &diff.to_insert {
            outcome.inserted += insert.execute(params![pair.evaluator(), pair.evaluatee()])?;
        }

        let mut delete = tx.prepare_cached(
            "DELETE FROM team_evaluation_pairs
             WHERE evaluator_team_id = ?1
               AND evaluatee_team_id = ?2;",
        )?;
        for pair in &diff.to_delete {
            outcome.deleted += delete.execute(params![pair.evaluator(), pair.evaluatee()])?;
        }
    }

    tx.commit()?;
    Ok(outcome)
}

fn load_team_ids(conn: &Connection, sql: &str, team_id: TeamId) -> RepoResult<Vec<TeamId>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([team_id])?;
    let mut team_ids = Vec::new();
    while let Some(row) = rows.next()? {
        team_ids.push(row.get(0)?);
    }
    Ok(team_ids)
}
