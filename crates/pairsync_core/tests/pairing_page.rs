use pairsync_core::db::open_db_in_memory;
use pairsync_core::{
    PairingService, Pivot, ProjectLevel, SqlitePairingRepository, SqliteTeamRepository,
};
use rusqlite::{params, Connection};

fn seed_team(conn: &Connection, team_id: i64, adviser_id: i64, level: &str, name: &str) {
    conn.execute(
        "INSERT INTO teams (
            team_id,
            adviser_id,
            team_name,
            project_level,
            student1_displayname,
            student2_displayname
         ) VALUES (?1, ?2, ?3, ?4, ?5, NULL);",
        params![team_id, adviser_id, name, level, format!("{name} lead")],
    )
    .unwrap();
}

fn seeded() -> Connection {
    let conn = open_db_in_memory().unwrap();
    seed_team(&conn, 7, 10, "artemis", "Orbit");
    seed_team(&conn, 3, 10, "gemini", "Lander");
    seed_team(&conn, 5, 10, "vostok", "Capsule");
    seed_team(&conn, 1, 10, "gemini", "Booster");
    seed_team(&conn, 9, 20, "vostok", "Elsewhere");
    conn.execute_batch(
        "INSERT INTO team_evaluation_pairs (evaluator_team_id, evaluatee_team_id) VALUES (3, 7);
         INSERT INTO team_evaluation_pairs (evaluator_team_id, evaluatee_team_id) VALUES (9, 7);",
    )
    .unwrap();
    conn
}

#[test]
fn roster_is_ordered_by_project_level_then_team_id() {
    let conn = seeded();
    let service = PairingService::new(
        SqliteTeamRepository::try_new(&conn).unwrap(),
        SqlitePairingRepository::try_new(&conn).unwrap(),
    );

    let page = service.load_page(10, Pivot::ByEvaluatee).unwrap();
    let order: Vec<_> = page
        .teams
        .iter()
        .map(|team| (team.team_id, team.project_level))
        .collect();
    assert_eq!(
        order,
        vec![
            (5, ProjectLevel::Vostok),
            (1, ProjectLevel::Gemini),
            (3, ProjectLevel::Gemini),
            (7, ProjectLevel::Artemis),
        ]
    );
    assert_eq!(page.teams[0].student1_displayname.as_deref(), Some("Capsule lead"));
    assert_eq!(page.teams[0].student2_displayname, None);
}

#[test]
fn matrix_is_complete_and_reflects_pivot() {
    let conn = seeded();
    let service = PairingService::new(
        SqliteTeamRepository::try_new(&conn).unwrap(),
        SqlitePairingRepository::try_new(&conn).unwrap(),
    );

    let by_evaluatee = service.load_page(10, Pivot::ByEvaluatee).unwrap();
    assert_eq!(by_evaluatee.matrix.len(), 4);
    assert!(by_evaluatee.matrix.values().all(|row| row.len() == 3));
    assert!(by_evaluatee.matrix[&7][&3]);
    assert!(!by_evaluatee.matrix[&3][&7]);
    assert!(!by_evaluatee.matrix[&7].contains_key(&9));

    let by_evaluator = service.load_page(10, Pivot::ByEvaluator).unwrap();
    assert!(by_evaluator.matrix[&3][&7]);
    assert!(!by_evaluator.matrix[&7][&3]);
}

#[test]
fn page_serializes_for_templates() {
    let conn = seeded();
    let service = PairingService::new(
        SqliteTeamRepository::try_new(&conn).unwrap(),
        SqlitePairingRepository::try_new(&conn).unwrap(),
    );

    let page = service.load_page(10, Pivot::ByEvaluator).unwrap();
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["pivot"], "by_evaluator");
    assert_eq!(json["teams"][0]["project_level"], "vostok");
    assert_eq!(json["matrix"]["3"]["7"], true);
    assert_eq!(json["matrix"]["1"]["3"], false);
}

#[test]
fn adviser_without_teams_gets_an_empty_page() {
    let conn = seeded();
    let service = PairingService::new(
        SqliteTeamRepository::try_new(&conn).unwrap(),
        SqlitePairingRepository::try_new(&conn).unwrap(),
    );

    let page = service.load_page(99, Pivot::ByEvaluatee).unwrap();
    assert!(page.teams.is_empty());
    assert!(page.matrix.is_empty());
}
