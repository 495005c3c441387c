//! Unit tests for storage functionality

use super::*;
use crate::cli::types::{EfficiencyColumn, RosterPosition, TeamId};
use chrono::{NaiveDate, TimeZone, Utc};

fn create_test_db() -> IngestDatabase {
    IngestDatabase::new_in_memory().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn game(id: &str, on: NaiveDate, status: &str, home_score: u32) -> Game {
    Game {
        game_id: id.to_string(),
        game_date: on,
        start_time_utc: Some(Utc.with_ymd_and_hms(2025, 10, 21, 23, 30, 0).unwrap()),
        status_text: status.to_string(),
        home_team_id: 1610612738,
        home_team_abbr: "BOS".to_string(),
        home_team_score: home_score,
        away_team_id: 1610612752,
        away_team_abbr: "NYK".to_string(),
        away_team_score: 0,
    }
}

#[test]
fn test_schema_seeds_teams() {
    let db = create_test_db();
    let teams = db.teams().unwrap();
    assert_eq!(teams.len(), 30);
    assert_eq!(teams[0].abbreviation, "ATL");
    assert_eq!(teams[29].team_id, TeamId::new(30));
}

#[test]
fn test_schema_initialization_is_idempotent() {
    let mut db = create_test_db();
    db.initialize_schema().unwrap();
    assert_eq!(db.teams().unwrap().len(), 30);
}

#[test]
fn test_replace_top_usage() {
    let mut db = create_test_db();
    let first = vec![TopUsagePlayer {
        team_id: TeamId::new(14),
        players: vec![UsageSlot::new("A", 30.0), UsageSlot::new("B", 25.0)],
    }];
    db.replace_top_usage(&first).unwrap();

    let second = vec![TopUsagePlayer {
        team_id: TeamId::new(2),
        players: vec![UsageSlot::new("C", 31.5), UsageSlot::new("D", 22.0)],
    }];
    db.replace_top_usage(&second).unwrap();

    assert_eq!(db.top_usage_players().unwrap(), second);
}

#[test]
fn test_top_usage_unused_slots_are_null() {
    let mut db = create_test_db();
    db.replace_top_usage(&[TopUsagePlayer {
        team_id: TeamId::new(1),
        players: vec![UsageSlot::new("A", 30.0), UsageSlot::new("B", 25.0)],
    }])
    .unwrap();

    let nulls: i64 = db
        .conn
        .query_row(
            "SELECT COUNT(*) FROM top_usage_players
             WHERE player3_name IS NULL AND player5_usage IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(nulls, 1);
}

#[test]
fn test_replace_positions_resets_identity() {
    let mut db = create_test_db();
    let rows = vec![
        PlayerPosition::new("A", RosterPosition::G),
        PlayerPosition::new("B", RosterPosition::FC),
    ];
    db.replace_positions(&rows).unwrap();
    db.replace_positions(&rows).unwrap();

    let max_id: i64 = db
        .conn
        .query_row("SELECT MAX(id) FROM positions", [], |row| row.get(0))
        .unwrap();
    assert_eq!(max_id, 2);
    assert_eq!(db.positions().unwrap(), rows);
}

#[test]
fn test_failed_replace_keeps_previous_rows() {
    let mut db = create_test_db();
    let original = vec![PlayerPosition::new("A", RosterPosition::G)];
    db.replace_positions(&original).unwrap();

    // Duplicate names violate the UNIQUE constraint mid-write.
    let bad = vec![
        PlayerPosition::new("X", RosterPosition::F),
        PlayerPosition::new("X", RosterPosition::C),
    ];
    let err = db.replace_positions(&bad).unwrap_err();
    assert!(matches!(
        err,
        crate::IngestError::Storage {
            table: "positions",
            ..
        }
    ));
    assert_eq!(db.positions().unwrap(), original);
}

#[test]
fn test_replace_averages() {
    let mut db = create_test_db();
    db.replace_averages(&[PlayerAverages::new("A", 25.0, 10.0, 5.0)])
        .unwrap();
    let rows = db.averages().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].player_pra, 40.0);
}

#[test]
fn test_replace_defensive_efficiency() {
    let mut db = create_test_db();
    let updates = vec![
        EfficiencyUpdate {
            team_id: TeamId::new(2),
            column: EfficiencyColumn::Pg,
            value: 101.5,
        },
        EfficiencyUpdate {
            team_id: TeamId::new(2),
            column: EfficiencyColumn::C,
            value: 97.0,
        },
        EfficiencyUpdate {
            team_id: TeamId::new(5),
            column: EfficiencyColumn::Sf,
            value: 99.0,
        },
    ];
    assert_eq!(db.replace_defensive_efficiency(&updates).unwrap(), 3);

    let rows = db.defensive_efficiency().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].pg_efficiency, Some(101.5));
    assert_eq!(rows[0].sg_efficiency, None);
    assert_eq!(rows[0].c_efficiency, Some(97.0));
    assert_eq!(rows[1].team_id, TeamId::new(5));
    assert_eq!(rows[1].sf_efficiency, Some(99.0));
}

#[test]
fn test_games_upsert_only_touches_target_date() {
    let mut db = create_test_db();
    let d1 = date(2025, 10, 21);
    let d2 = date(2025, 10, 22);

    db.upsert_games_for_date(d1, &[game("001", d1, "7:30 pm ET", 0)])
        .unwrap();
    db.upsert_games_for_date(d2, &[game("002", d2, "8:00 pm ET", 0)])
        .unwrap();
    db.upsert_games_for_date(d1, &[game("001", d1, "Final", 112)])
        .unwrap();

    let day1 = db.games_on(d1).unwrap();
    assert_eq!(day1.len(), 1);
    assert_eq!(day1[0].status_text, "Final");
    assert_eq!(day1[0].home_team_score, 112);
    assert_eq!(day1[0].start_time_utc, game("001", d1, "", 0).start_time_utc);

    assert_eq!(db.games_on(d2).unwrap(), vec![game("002", d2, "8:00 pm ET", 0)]);
}

#[test]
fn test_games_empty_date_clears_rows() {
    let mut db = create_test_db();
    let d = date(2025, 12, 25);
    db.upsert_games_for_date(d, &[game("001", d, "Final", 100)])
        .unwrap();
    db.upsert_games_for_date(d, &[]).unwrap();
    assert!(db.games_on(d).unwrap().is_empty());
}

#[test]
fn test_games_null_start_time_round_trips() {
    let mut db = create_test_db();
    let d = date(2026, 1, 5);
    let mut g = game("003", d, "TBD", 0);
    g.start_time_utc = None;
    db.upsert_games_for_date(d, &[g.clone()]).unwrap();
    assert_eq!(db.games_on(d).unwrap(), vec![g]);
}

#[test]
fn test_row_count() {
    let mut db = create_test_db();
    assert_eq!(db.row_count("averages").unwrap(), 0);
    db.replace_averages(&[
        PlayerAverages::new("A", 1.0, 1.0, 1.0),
        PlayerAverages::new("B", 2.0, 2.0, 2.0),
    ])
    .unwrap();
    assert_eq!(db.row_count("averages").unwrap(), 2);
}
