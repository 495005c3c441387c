//! Integration tests for the ingestion jobs against a mock stats service

use arrbo_ingest::{
    commands::{
        averages::ingest_averages, games::ingest_games, positions::ingest_positions,
        usage::ingest_usage, JobPhase,
    },
    config::JobSettings,
    nba::StatsClient,
    storage::*,
    IngestError, Season, TeamId,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const LAL: u32 = 1610612747;
const BOS: u32 = 1610612738;

fn season() -> Season {
    Season::new(2025)
}

fn envelope(name: &str, headers: &[&str], rows: Vec<Value>) -> Value {
    json!({ "resultSets": [{ "name": name, "headers": headers, "rowSet": rows }] })
}

async fn mount_league(server: &MockServer, measure: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/leaguedashplayerstats"))
        .and(query_param("MeasureType", measure))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_roster(server: &MockServer, team: u32, players: &[(&str, &str)]) {
    let rows = players.iter().map(|(n, p)| json!([n, p])).collect();
    Mock::given(method("GET"))
        .and(path("/commonteamroster"))
        .and(query_param("TeamID", team.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope("CommonTeamRoster", &["PLAYER", "POSITION"], rows)),
        )
        .mount(server)
        .await;
}

async fn mount_scoreboard(
    server: &MockServer,
    game_date: &str,
    headers: Vec<Value>,
    lines: Vec<Value>,
) {
    let body = json!({ "resultSets": [
        {
            "name": "GameHeader",
            "headers": ["GAME_ID", "GAME_STATUS_TEXT", "HOME_TEAM_ID", "VISITOR_TEAM_ID", "GAME_DATE_TIME_UTC"],
            "rowSet": headers
        },
        {
            "name": "LineScore",
            "headers": ["GAME_ID", "TEAM_ID", "TEAM_ABBREVIATION", "PTS"],
            "rowSet": lines
        }
    ]});
    Mock::given(method("GET"))
        .and(path("/scoreboardv2"))
        .and(query_param("GameDate", game_date))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn usage_body() -> Value {
    envelope(
        "LeagueDashPlayerStats",
        &["PLAYER_NAME", "TEAM_ID", "USG_PCT"],
        vec![
            json!(["A", LAL, 30.0]),
            json!(["B", LAL, 25.0]),
            json!(["D", LAL, 99.0]),
            json!(["E", BOS, 28.0]),
        ],
    )
}

fn setup() -> (IngestDatabase, JobSettings) {
    (
        IngestDatabase::new_in_memory().unwrap(),
        JobSettings::immediate(),
    )
}

#[tokio::test]
async fn test_usage_job_keeps_roster_players_only() {
    let server = MockServer::start().await;
    mount_league(&server, "Usage", usage_body()).await;
    mount_roster(&server, LAL, &[("A", "G"), ("B", "F"), ("C", "C")]).await;
    mount_roster(&server, BOS, &[("E", "G")]).await;

    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();

    let report = ingest_usage(&api, &mut db, season(), &settings).await.unwrap();

    assert_eq!(report.phase, JobPhase::Done);
    assert_eq!(report.rows_written, 1);
    // 28 roster failures plus Boston with a single eligible player.
    assert_eq!(report.skipped.len(), 29);
    assert!(report.skipped.contains(&BOS.to_string()));

    let rows = db.top_usage_players().unwrap();
    assert_eq!(
        rows,
        vec![TopUsagePlayer {
            team_id: TeamId::new(14),
            players: vec![UsageSlot::new("A", 30.0), UsageSlot::new("B", 25.0)],
        }]
    );
}

#[tokio::test]
async fn test_usage_job_is_idempotent() {
    let server = MockServer::start().await;
    mount_league(&server, "Usage", usage_body()).await;
    mount_roster(&server, LAL, &[("A", "G"), ("B", "F")]).await;

    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();

    ingest_usage(&api, &mut db, season(), &settings).await.unwrap();
    let first = db.top_usage_players().unwrap();
    ingest_usage(&api, &mut db, season(), &settings).await.unwrap();

    assert_eq!(db.top_usage_players().unwrap(), first);
}

#[tokio::test]
async fn test_usage_league_failure_leaves_table_intact() {
    let server = MockServer::start().await;
    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();
    db.replace_top_usage(&[TopUsagePlayer {
        team_id: TeamId::new(1),
        players: vec![UsageSlot::new("X", 20.0), UsageSlot::new("Y", 19.0)],
    }])
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/leaguedashplayerstats"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = ingest_usage(&api, &mut db, season(), &settings)
        .await
        .unwrap_err();

    match err {
        IngestError::JobFailed { job, phase, .. } => {
            assert_eq!(job, "usage");
            assert_eq!(phase, "fetching");
        }
        other => panic!("Expected JobFailed, got {other:?}"),
    }
    assert_eq!(db.top_usage_players().unwrap().len(), 1);
}

#[tokio::test]
async fn test_positions_job_dedups_traded_players() {
    let server = MockServer::start().await;
    // Boston is fetched before the Lakers, so the Lakers entry wins.
    mount_roster(&server, BOS, &[("Traded", "G"), ("Only Bos", "F-C")]).await;
    mount_roster(&server, LAL, &[("Traded", "SF"), ("Only Lal", "Coach")]).await;

    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();

    let report = ingest_positions(&api, &mut db, season(), &settings)
        .await
        .unwrap();

    assert_eq!(report.rows_written, 2);
    assert_eq!(report.skipped.len(), 28);
    let rows = db.positions().unwrap();
    assert_eq!(
        rows,
        vec![
            PlayerPosition {
                player_name: "Traded".to_string(),
                player_position: "F".to_string(),
            },
            PlayerPosition {
                player_name: "Only Bos".to_string(),
                player_position: "F-C".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_averages_job() {
    let server = MockServer::start().await;
    mount_league(
        &server,
        "Base",
        envelope(
            "LeagueDashPlayerStats",
            &["PLAYER_NAME", "PTS", "REB", "AST"],
            vec![
                json!(["A", 30.1, 5.4, 6.0]),
                json!(["B", "n/a", 2.0, 1.0]),
                json!(["C", 10.0, 12.5, 1.5]),
            ],
        ),
    )
    .await;

    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();

    let report = ingest_averages(&api, &mut db, season(), &settings)
        .await
        .unwrap();

    assert_eq!(report.rows_written, 2);
    let rows = db.averages().unwrap();
    assert_eq!(rows[0].player_name, "A");
    assert!((rows[0].player_pra - 41.5).abs() < 1e-9);
    assert_eq!(rows[1].player_pra, 24.0);
}

#[tokio::test]
async fn test_games_job_upserts_one_date() {
    let day1 = NaiveDate::from_ymd_opt(2025, 10, 21).unwrap();
    let day2 = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();

    let server = MockServer::start().await;
    mount_scoreboard(
        &server,
        "10/21/2025",
        vec![json!(["0022500001", "Final", LAL, BOS, "2025-10-21T23:30:00Z"])],
        vec![
            json!(["0022500001", LAL, "LAL", 118]),
            json!(["0022500001", BOS, "BOS", 109]),
        ],
    )
    .await;
    mount_scoreboard(&server, "10/22/2025", vec![], vec![]).await;

    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();

    let stale = Game {
        game_id: "0022500999".to_string(),
        game_date: day1,
        start_time_utc: None,
        status_text: "Postponed".to_string(),
        home_team_id: BOS,
        home_team_abbr: "BOS".to_string(),
        home_team_score: 0,
        away_team_id: LAL,
        away_team_abbr: "LAL".to_string(),
        away_team_score: 0,
    };
    let other_day = Game {
        game_id: "0022500100".to_string(),
        game_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
        ..stale.clone()
    };
    db.upsert_games_for_date(day1, &[stale]).unwrap();
    db.upsert_games_for_date(other_day.game_date, &[other_day.clone()])
        .unwrap();

    let report = ingest_games(&api, &mut db, day1, &settings).await.unwrap();
    assert_eq!(report.rows_written, 1);

    let games = db.games_on(day1).unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].game_id, "0022500001");
    assert_eq!(games[0].home_team_abbr, "LAL");
    assert_eq!(games[0].home_team_score, 118);
    assert_eq!(games[0].away_team_score, 109);
    assert!(games[0].start_time_utc.is_some());

    assert_eq!(db.games_on(other_day.game_date).unwrap(), vec![other_day]);

    let report = ingest_games(&api, &mut db, day2, &settings).await.unwrap();
    assert_eq!(report.rows_written, 0);
    assert!(db.games_on(day2).unwrap().is_empty());
}

#[tokio::test]
async fn test_positions_job_is_idempotent() {
    let server = MockServer::start().await;
    mount_roster(&server, BOS, &[("Traded", "G"), ("Only Bos", "F-C")]).await;
    mount_roster(&server, LAL, &[("Traded", "SF"), ("Only Lal", "C")]).await;

    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();

    ingest_positions(&api, &mut db, season(), &settings)
        .await
        .unwrap();
    let first = db.positions().unwrap();
    ingest_positions(&api, &mut db, season(), &settings)
        .await
        .unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(db.positions().unwrap(), first);
    assert_eq!(db.row_count("positions").unwrap(), 3);
}

#[tokio::test]
async fn test_averages_job_is_idempotent() {
    let server = MockServer::start().await;
    mount_league(
        &server,
        "Base",
        envelope(
            "LeagueDashPlayerStats",
            &["PLAYER_NAME", "PTS", "REB", "AST"],
            vec![json!(["A", 30.1, 5.4, 6.0]), json!(["C", 10.0, 12.5, 1.5])],
        ),
    )
    .await;

    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();

    ingest_averages(&api, &mut db, season(), &settings)
        .await
        .unwrap();
    let first = db.averages().unwrap();
    ingest_averages(&api, &mut db, season(), &settings)
        .await
        .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(db.averages().unwrap(), first);
}

#[tokio::test]
async fn test_games_job_is_idempotent() {
    let day = NaiveDate::from_ymd_opt(2025, 10, 21).unwrap();
    let server = MockServer::start().await;
    mount_scoreboard(
        &server,
        "10/21/2025",
        vec![json!(["0022500001", "Final", LAL, BOS, "2025-10-21T23:30:00Z"])],
        vec![
            json!(["0022500001", LAL, "LAL", 118]),
            json!(["0022500001", BOS, "BOS", 109]),
        ],
    )
    .await;

    let api = StatsClient::new(server.uri()).unwrap();
    let (mut db, settings) = setup();

    ingest_games(&api, &mut db, day, &settings).await.unwrap();
    let first = db.games_on(day).unwrap();
    ingest_games(&api, &mut db, day, &settings).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(db.games_on(day).unwrap(), first);
    assert_eq!(db.row_count("games").unwrap(), 1);
}
