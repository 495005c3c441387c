//! Stats-service HTTP client.
//!
//! [`StatsApi`] is the seam the jobs depend on; [`StatsClient`] is the real
//! implementation over `reqwest`. Calls here make exactly one request: pacing
//! and retries are layered on by [`crate::nba::adapters`].

use crate::cli::types::{NbaTeamId, Season};
use crate::core::http::build_stats_client;
use crate::nba::types::StatsResponse;
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Default base URL of the stats service.
pub const STATS_BASE_URL: &str = "https://stats.nba.com/stats";

const LEAGUE_ID: &str = "00";
const SEASON_TYPE: &str = "Regular Season";

/// `MeasureType` of `leaguedashplayerstats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureType {
    Base,
    Usage,
}

impl MeasureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureType::Base => "Base",
            MeasureType::Usage => "Usage",
        }
    }
}

/// Remote stats queries used by the ingestion jobs.
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// Whole-league per-player per-game aggregates for a season.
    async fn league_player_stats(
        &self,
        season: Season,
        measure: MeasureType,
        timeout: Duration,
    ) -> Result<StatsResponse>;

    /// One team's current roster for a season.
    async fn team_roster(
        &self,
        team: NbaTeamId,
        season: Season,
        timeout: Duration,
    ) -> Result<StatsResponse>;

    /// Game headers and line scores for one calendar date.
    async fn scoreboard(&self, date: NaiveDate, timeout: Duration) -> Result<StatsResponse>;
}

pub struct StatsClient {
    client: Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_stats_client(Duration::from_secs(15))?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<StatsResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);

        let resp = self
            .client
            .get(&url)
            .query(params)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<StatsResponse>()
            .await?;
        Ok(resp)
    }
}

/// Query for `leaguedashplayerstats`. The endpoint rejects requests that omit
/// any of its filters, so the neutral value of each is spelled out.
pub fn league_player_stats_params(season: Season, measure: MeasureType) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = vec![
        ("LeagueID", LEAGUE_ID.to_string()),
        ("Season", season.to_string()),
        ("SeasonType", SEASON_TYPE.to_string()),
        ("MeasureType", measure.as_str().to_string()),
        ("PerMode", "PerGame".to_string()),
        ("PlusMinus", "N".to_string()),
        ("PaceAdjust", "N".to_string()),
        ("Rank", "N".to_string()),
    ];
    for zero in [
        "LastNGames",
        "Month",
        "OpponentTeamID",
        "PORound",
        "Period",
        "TeamID",
    ] {
        params.push((zero, "0".to_string()));
    }
    for empty in [
        "College",
        "Conference",
        "Country",
        "DateFrom",
        "DateTo",
        "Division",
        "DraftPick",
        "DraftYear",
        "GameScope",
        "GameSegment",
        "Height",
        "Location",
        "Outcome",
        "PlayerExperience",
        "PlayerPosition",
        "SeasonSegment",
        "ShotClockRange",
        "StarterBench",
        "VsConference",
        "VsDivision",
        "Weight",
    ] {
        params.push((empty, String::new()));
    }
    params
}

#[async_trait]
impl StatsApi for StatsClient {
    async fn league_player_stats(
        &self,
        season: Season,
        measure: MeasureType,
        timeout: Duration,
    ) -> Result<StatsResponse> {
        let params = league_player_stats_params(season, measure);
        self.get("leaguedashplayerstats", &params, timeout).await
    }

    async fn team_roster(
        &self,
        team: NbaTeamId,
        season: Season,
        timeout: Duration,
    ) -> Result<StatsResponse> {
        let params = [
            ("LeagueID", LEAGUE_ID.to_string()),
            ("Season", season.to_string()),
            ("TeamID", team.to_string()),
        ];
        self.get("commonteamroster", &params, timeout).await
    }

    async fn scoreboard(&self, date: NaiveDate, timeout: Duration) -> Result<StatsResponse> {
        let params = [
            ("DayOffset", "0".to_string()),
            ("GameDate", date.format("%m/%d/%Y").to_string()),
            ("LeagueID", LEAGUE_ID.to_string()),
        ];
        self.get("scoreboardv2", &params, timeout).await
    }
}
