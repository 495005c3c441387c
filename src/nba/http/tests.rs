//! Unit tests for the stats-service client

use super::*;
use crate::error::IngestError;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[cfg(test)]
mod http_tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_league_player_stats_success() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "resultSets": [{
                "name": "LeagueDashPlayerStats",
                "headers": ["PLAYER_NAME", "TEAM_ID", "USG_PCT"],
                "rowSet": [["Jalen Brunson", 1610612752, 31.2]]
            }]
        });

        Mock::given(method("GET"))
            .and(path("/stats/leaguedashplayerstats"))
            .and(query_param("Season", "2025-26"))
            .and(query_param("MeasureType", "Usage"))
            .and(query_param("PerMode", "PerGame"))
            .and(query_param("LeagueID", "00"))
            .and(header("x-nba-stats-token", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = StatsClient::new(format!("{}/stats", mock_server.uri())).unwrap();
        let resp = client
            .league_player_stats(Season::new(2025), MeasureType::Usage, TIMEOUT)
            .await
            .unwrap();

        let rs = resp.result_set("LeagueDashPlayerStats", 0).unwrap();
        assert_eq!(rs.row_set.len(), 1);
    }

    #[tokio::test]
    async fn test_team_roster_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/commonteamroster"))
            .and(query_param("TeamID", "1610612747"))
            .and(query_param("Season", "2024-25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultSets": [{
                    "name": "CommonTeamRoster",
                    "headers": ["PLAYER", "POSITION"],
                    "rowSet": [["LeBron James", "F"]]
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = StatsClient::new(mock_server.uri()).unwrap();
        let resp = client
            .team_roster(NbaTeamId::new(1610612747), Season::new(2024), TIMEOUT)
            .await
            .unwrap();
        assert_eq!(resp.result_sets[0].name, "CommonTeamRoster");
    }

    #[tokio::test]
    async fn test_scoreboard_date_format() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/scoreboardv2"))
            .and(query_param("GameDate", "11/02/2025"))
            .and(query_param("DayOffset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultSets": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = StatsClient::new(format!("{}/", mock_server.uri())).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        let resp = client.scoreboard(date, TIMEOUT).await.unwrap();
        assert!(resp.result_sets.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_status_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let client = StatsClient::new(mock_server.uri()).unwrap();
        let result = client
            .league_player_stats(Season::new(2025), MeasureType::Base, TIMEOUT)
            .await;

        match result {
            Err(IngestError::Http(e)) => assert_eq!(e.status().map(|s| s.as_u16()), Some(503)),
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
            .mount(&mock_server)
            .await;

        let client = StatsClient::new(mock_server.uri()).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        assert!(client.scoreboard(date, TIMEOUT).await.is_err());
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"resultSets": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = StatsClient::new(mock_server.uri()).unwrap();
        let result = client
            .team_roster(
                NbaTeamId::new(1610612737),
                Season::new(2025),
                Duration::from_millis(50),
            )
            .await;

        match result {
            Err(IngestError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_league_params_include_neutral_filters() {
        let params = league_player_stats_params(Season::new(2025), MeasureType::Base);
        let get = |k: &str| params.iter().find(|(key, _)| *key == k).map(|(_, v)| v.as_str());

        assert_eq!(get("Season"), Some("2025-26"));
        assert_eq!(get("MeasureType"), Some("Base"));
        assert_eq!(get("LastNGames"), Some("0"));
        assert_eq!(get("PlayerPosition"), Some(""));
        assert_eq!(get("SeasonType"), Some("Regular Season"));
    }

    #[test]
    fn test_stats_base_url_constant() {
        assert_eq!(STATS_BASE_URL, "https://stats.nba.com/stats");
    }
}
