//! Team repository: adviser group resolution and roster reads.
//!
//! # Responsibility
//! - Resolve an adviser id to the set of teams under supervision.
//! - Load the roster rows rendered beside the pairing matrix.
//!
//! # Invariants
//! - An adviser with no teams resolves to an empty group, not an error.
//! - Roster order is project level (vostok, gemini, apollo, artemis), then
//!   team id.

use crate::model::team::{AdviserGroup, AdviserId, ProjectLevel, TeamId, TeamSummary};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::schema_guard::ensure_table;
use rusqlite::{Connection, Row};

const TEAM_COLUMNS: &[&str] = &[
    "team_id",
    "adviser_id",
    "team_name",
    "project_level",
    "student1_displayname",
    "student2_displayname",
];

/// Read-only access to the teams an adviser supervises.
pub trait TeamRepository {
    /// Returns the (possibly empty) group of teams under `adviser_id`.
    fn resolve_group(&self, adviser_id: AdviserId) -> RepoResult<AdviserGroup>;
    /// Returns roster rows for every team under `adviser_id`.
    fn list_adviser_teams(&self, adviser_id: AdviserId) -> RepoResult<Vec<TeamSummary>>;
}

/// SQLite-backed team repository.
pub struct SqliteTeamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeamRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "teams", TEAM_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TeamRepository for SqliteTeamRepository<'_> {
    fn resolve_group(&self, adviser_id: AdviserId) -> RepoResult<AdviserGroup> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_id FROM teams WHERE adviser_id = ?1 ORDER BY team_id ASC;")?;
        let mut rows = stmt.query([adviser_id])?;
        let mut team_ids = Vec::new();
        while let Some(row) = rows.next()? {
            team_ids.push(row.get::<_, TeamId>(0)?);
        }
        Ok(AdviserGroup::new(adviser_id, team_ids))
    }

    fn list_adviser_teams(&self, adviser_id: AdviserId) -> RepoResult<Vec<TeamSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                team_id,
                team_name,
                project_level,
                student1_displayname,
                student2_displayname
             FROM teams
             WHERE adviser_id = ?1
             ORDER BY
                CASE project_level
                    WHEN 'vostok' THEN 0
                    WHEN 'gemini' THEN 1
                    WHEN 'apollo' THEN 2
                    WHEN 'artemis' THEN 3
                    ELSE 4
                END ASC,
                team_id ASC;",
        )?;
        let mut rows = stmt.query([adviser_id])?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next()? {
            teams.push(parse_team_row(row)?);
        }
        Ok(teams)
    }
}

fn parse_team_row(row: &Row<'_>) -> RepoResult<TeamSummary> {
    let level_text: String = row.get("project_level")?;
    let project_level = level_text.parse::<ProjectLevel>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid project level `{level_text}` in teams.project_level"
        ))
    })?;

    Ok(TeamSummary {
        team_id: row.get("team_id")?,
        team_name: row.get("team_name")?,
        project_level,
        student1_displayname: row.get("student1_displayname")?,
        student2_displayname: row.get("student2_displayname")?,
    })
}
