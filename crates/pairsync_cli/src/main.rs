//! Command-line viewer for the pairing core.
//!
//! Usage: `pairsync_cli <db_path> <adviser_id> [evaluatee|evaluator]`
//!
//! Prints the adviser's roster and checkbox grid. Set `PAIRSYNC_LOG_DIR` to
//! an absolute path to capture core logs.

use pairsync_core::db::open_db;
use pairsync_core::{
    core_version, default_log_level, init_logging, AdviserId, PairingService, Pivot,
    SqlitePairingRepository, SqliteTeamRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("pairsync: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    if let Ok(log_dir) = std::env::var("PAIRSYNC_LOG_DIR") {
        init_logging(default_log_level().as_str(), &log_dir)?;
    }

    let [db_path, adviser_id, rest @ ..] = args.as_slice() else {
        return Err(format!(
            "usage: pairsync_cli <db_path> <adviser_id> [evaluatee|evaluator] (core {})",
            core_version()
        ));
    };
    let adviser_id = parse_adviser_id(adviser_id)?;
    let pivot = match rest.first() {
        Some(value) => value.parse::<Pivot>()?,
        None => Pivot::ByEvaluatee,
    };

    let conn = open_db(db_path).map_err(|err| err.to_string())?;
    let teams = SqliteTeamRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let pairings = SqlitePairingRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = PairingService::new(teams, pairings);
    let page = service
        .load_page(adviser_id, pivot)
        .map_err(|err| err.to_string())?;

    println!("adviser={} pivot={} teams={}", page.adviser_id, page.pivot, page.teams.len());
    for team in &page.teams {
        let row = page
            .matrix
            .get(&team.team_id)
            .map(|partners| {
                partners
                    .iter()
                    .map(|(partner, checked)| format!("{partner}:{}", if *checked { "x" } else { "." }))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        println!(
            "{:>6} {:<8} {:<24} {}",
            team.team_id,
            team.project_level,
            team.team_name.as_deref().unwrap_or("-"),
            row
        );
    }
    Ok(())
}

fn parse_adviser_id(raw: &str) -> Result<AdviserId, String> {
    raw.trim()
        .parse::<AdviserId>()
        .map_err(|err| format!("invalid adviser id `{raw}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::parse_adviser_id;

    #[test]
    fn adviser_id_accepts_integers_and_rejects_text() {
        assert_eq!(parse_adviser_id("42"), Ok(42));
        assert_eq!(parse_adviser_id(" 7 "), Ok(7));
        assert!(parse_adviser_id("seven").unwrap_err().contains("seven"));
    }
}
