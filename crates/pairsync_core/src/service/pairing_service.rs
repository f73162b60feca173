//! Peer-evaluation pairing service.
//!
//! # Responsibility
//! - Page load: resolve the adviser group, read its current pairs and
//!   project them into the requested pivot.
//! - Submission: resolve the group, parse the form, read a fresh current
//!   snapshot, diff, then persist.
//!
//! # Invariants
//! - The current state is read after the form is parsed and before the
//!   diff, so the diff never runs against an older snapshot.
//! - Every read and write is scoped to the requesting adviser's group.
//! - Malformed form input is dropped, never surfaced as an error.

use crate::model::pair::Pair;
use crate::model::team::{AdviserGroup, AdviserId, TeamId, TeamSummary};
use crate::pairing::diff::{diff_pairings, PairingDiff};
use crate::pairing::matrix::{pivot_matrix, PairingMatrix};
use crate::pairing::parse::{parse_desired_state_keyed_by, RawForm};
use crate::pairing::Pivot;
use crate::repo::error::RepoError;
use crate::repo::pairing_repo::{ApplyOutcome, PairingRepository};
use crate::repo::team_repo::TeamRepository;
use log::{error, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for pairing use-cases.
#[derive(Debug)]
pub enum PairingServiceError {
    /// Requester does not hold a valid adviser role.
    NotAuthorized(AdviserId),
    /// Persistence-layer failure; fatal to the request.
    Repo(RepoError),
}

impl Display for PairingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthorized(adviser_id) => {
                write!(f, "adviser role {adviser_id} is not authorized")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PairingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotAuthorized(_) => None,
        }
    }
}

impl From<RepoError> for PairingServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type PairingServiceResult<T> = Result<T, PairingServiceError>;

/// Everything the pairing page template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairingPage {
    pub adviser_id: AdviserId,
    pub pivot: Pivot,
    /// Roster in display order.
    pub teams: Vec<TeamSummary>,
    /// Complete checkbox grid for the group.
    pub matrix: PairingMatrix,
}

/// Result of one submission, for logging and the success flash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub adviser_id: AdviserId,
    pub pivot: Pivot,
    pub group_size: usize,
    pub desired: usize,
    /// Planned changes computed against the fresh snapshot.
    pub diff: PairingDiff,
    /// Rows the store actually changed.
    pub applied: ApplyOutcome,
    pub dropped_keys: usize,
    pub dropped_values: usize,
}

/// Pairing facade over team and pairing repositories.
pub struct PairingService<T: TeamRepository, P: PairingRepository> {
    teams: T,
    pairings: P,
}

impl<T: TeamRepository, P: PairingRepository> PairingService<T, P> {
    /// Creates a service using the provided repository implementations.
    pub fn new(teams: T, pairings: P) -> Self {
        Self { teams, pairings }
    }

    /// Resolves the group an adviser is allowed to pair.
    pub fn resolve_group(&self, adviser_id: AdviserId) -> PairingServiceResult<AdviserGroup> {
        ensure_adviser(adviser_id)?;
        Ok(self.teams.resolve_group(adviser_id)?)
    }

    /// Loads roster and checkbox grid for one pivot.
    pub fn load_page(
        &self,
        adviser_id: AdviserId,
        pivot: Pivot,
    ) -> PairingServiceResult<PairingPage> {
        let group = self.resolve_group(adviser_id)?;
        let current = self.pairings.read_current(&group)?;
        let teams = self.teams.list_adviser_teams(adviser_id)?;

        Ok(PairingPage {
            adviser_id,
            pivot,
            teams,
            matrix: pivot_matrix(&current, &group, pivot),
        })
    }

    /// Reconciles persisted pairs with a submitted checkbox form.
    ///
    /// `keyed_by` names the side of each pair that the form keys carry.
    pub fn sync(
        &self,
        adviser_id: AdviserId,
        form: &RawForm,
        keyed_by: Pivot,
    ) -> PairingServiceResult<SyncReport> {
        let started_at = Instant::now();
        info!(
            "event=pairing_sync module=service status=start adviser_id={} pivot={}",
            adviser_id, keyed_by
        );

        match self.sync_inner(adviser_id, form, keyed_by) {
            Ok(report) => {
                info!(
                    "event=pairing_sync module=service status=ok adviser_id={} pivot={} group_size={} desired={} to_insert={} to_delete={} inserted={} deleted={} dropped_keys={} dropped_values={} duration_ms={}",
                    adviser_id,
                    keyed_by,
                    report.group_size,
                    report.desired,
                    report.diff.to_insert.len(),
                    report.diff.to_delete.len(),
                    report.applied.inserted,
                    report.applied.deleted,
                    report.dropped_keys,
                    report.dropped_values,
                    started_at.elapsed().as_millis()
                );
                Ok(report)
            }
            Err(err) => {
                error!(
                    "event=pairing_sync module=service status=error adviser_id={} pivot={} duration_ms={} error={}",
                    adviser_id,
                    keyed_by,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Returns whether `evaluator` is assigned to review `evaluatee`.
    ///
    /// A self-pair or non-positive id is never authorized.
    pub fn can_evaluate(
        &self,
        evaluator: TeamId,
        evaluatee: TeamId,
    ) -> PairingServiceResult<bool> {
        match Pair::new(evaluator, evaluatee) {
            Ok(pair) => Ok(self.pairings.is_paired(&pair)?),
            Err(_) => Ok(false),
        }
    }

    /// Teams `evaluator` reviews.
    pub fn evaluatees_of(&self, evaluator: TeamId) -> PairingServiceResult<Vec<TeamId>> {
        Ok(self.pairings.evaluatees_of(evaluator)?)
    }

    /// Teams reviewing `evaluatee`.
    pub fn evaluators_of(&self, evaluatee: TeamId) -> PairingServiceResult<Vec<TeamId>> {
        Ok(self.pairings.evaluators_of(evaluatee)?)
    }

    fn sync_inner(
        &self,
        adviser_id: AdviserId,
        form: &RawForm,
        keyed_by: Pivot,
    ) -> PairingServiceResult<SyncReport> {
        let group = self.resolve_group(adviser_id)?;
        let parsed = parse_desired_state_keyed_by(form, &group, keyed_by);
        if parsed.dropped_keys > 0 || parsed.dropped_values > 0 {
            warn!(
                "event=pairing_form_dropped module=service status=ok adviser_id={} dropped_keys={} dropped_values={}",
                adviser_id, parsed.dropped_keys, parsed.dropped_values
            );
        }

        let current = self.pairings.read_current(&group)?;
        let diff = diff_pairings(&group.candidate_universe(), &current, &parsed.desired);
        let applied = self.pairings.apply(&diff)?;

        Ok(SyncReport {
            adviser_id,
            pivot: keyed_by,
            group_size: group.len(),
            desired: parsed.desired.len(),
            diff,
            applied,
            dropped_keys: parsed.dropped_keys,
            dropped_values: parsed.dropped_values,
        })
    }
}

fn ensure_adviser(adviser_id: AdviserId) -> PairingServiceResult<()> {
    if adviser_id <= 0 {
        return Err(PairingServiceError::NotAuthorized(adviser_id));
    }
    Ok(())
}
