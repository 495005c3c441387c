//! Stats-service response envelope and the typed rows parsed out of it.
//!
//! Every endpoint answers with a list of tabular result sets:
//!
//! ```json
//! {"resultSets": [{"name": "...", "headers": ["A", "B"], "rowSet": [[1, "x"]]}]}
//! ```
//!
//! Parsers resolve columns by header name once per result set; a missing
//! column is an error for the whole set, while a malformed cell only drops
//! its row.

use crate::cli::types::NbaTeamId;
use crate::error::{IngestError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;


/// Top-level envelope shared by every stats endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", default)]
    pub result_sets: Vec<ResultSet>,
}

impl StatsResponse {
    /// Find a result set by name, falling back to its usual position when no
    /// set carries that name.
    pub fn result_set(&self, name: &str, fallback_index: usize) -> Result<&ResultSet> {
        self.result_sets
            .iter()
            .find(|rs| rs.name == name)
            .or_else(|| self.result_sets.get(fallback_index))
            .ok_or_else(|| IngestError::MissingResultSet {
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResultSet {
    #[serde(default)]
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(name: &str, headers: &[&str], row_set: Vec<Vec<Value>>) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            row_set,
        }
    }

    /// Index of a header, or `MissingColumn`.
    pub fn column(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| IngestError::MissingColumn {
                result_set: self.name.clone(),
                column: header.to_string(),
            })
    }

    /// Index of a header the service does not always send.
    pub fn optional_column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// Numeric cell, accepting numbers and numeric strings. NaN/inf are rejected.
pub fn cell_f64(row: &[Value], idx: usize) -> Option<f64> {
    let v = match row.get(idx)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Non-empty trimmed text cell; numbers are rendered as text.
pub fn cell_string(row: &[Value], idx: usize) -> Option<String> {
    let s = match row.get(idx)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Unsigned integer cell; floats are truncated, anything else is `None`.
pub fn cell_u32(row: &[Value], idx: usize) -> Option<u32> {
    let v = cell_f64(row, idx)?;
    (v >= 0.0 && v <= u32::MAX as f64).then_some(v as u32)
}

/// One player's usage share from `leaguedashplayerstats` (measure `Usage`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRow {
    pub nba_team_id: NbaTeamId,
    pub player_name: String,
    pub usage: f64,
}

/// One player on a `commonteamroster` response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub player_name: String,
    pub position: Option<String>,
}

/// One player's per-game box averages from `leaguedashplayerstats` (measure `Base`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AveragesRow {
    pub player_name: String,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
}

/// `GameHeader` row of `scoreboardv2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameHeader {
    pub game_id: String,
    pub status_text: String,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub start_time_utc: Option<DateTime<Utc>>,
}

/// `LineScore` row of `scoreboardv2`: one per team per game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineScore {
    pub game_id: String,
    pub team_id: u32,
    pub abbreviation: String,
    pub points: u32,
}

/// Both halves of a scoreboard response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scoreboard {
    pub headers: Vec<GameHeader>,
    pub line_scores: Vec<LineScore>,
}

pub fn parse_usage(rs: &ResultSet) -> Result<Vec<UsageRow>> {
    let team = rs.column("TEAM_ID")?;
    let name = rs.column("PLAYER_NAME")?;
    let usage = rs.column("USG_PCT")?;

    Ok(rs
        .row_set
        .iter()
        .filter_map(|row| {
            Some(UsageRow {
                nba_team_id: NbaTeamId::new(cell_u32(row, team)?),
                player_name: cell_string(row, name)?,
                usage: cell_f64(row, usage)?,
            })
        })
        .collect())
}

pub fn parse_roster(rs: &ResultSet) -> Result<Vec<RosterEntry>> {
    let name = rs.column("PLAYER")?;
    let position = rs.optional_column("POSITION");

    Ok(rs
        .row_set
        .iter()
        .filter_map(|row| {
            Some(RosterEntry {
                player_name: cell_string(row, name)?,
                position: position.and_then(|idx| cell_string(row, idx)),
            })
        })
        .collect())
}

pub fn parse_averages(rs: &ResultSet) -> Result<Vec<AveragesRow>> {
    let name = rs.column("PLAYER_NAME")?;
    let pts = rs.column("PTS")?;
    let reb = rs.column("REB")?;
    let ast = rs.column("AST")?;

    Ok(rs
        .row_set
        .iter()
        .filter_map(|row| {
            Some(AveragesRow {
                player_name: cell_string(row, name)?,
                points: cell_f64(row, pts)?,
                rebounds: cell_f64(row, reb)?,
                assists: cell_f64(row, ast)?,
            })
        })
        .collect())
}

/// Parse an ISO-8601 instant; a trailing `Z` and naive timestamps are read as UTC.
pub fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(s.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

pub fn parse_scoreboard(resp: &StatsResponse) -> Result<Scoreboard> {
    let header_rs = resp.result_set("GameHeader", 0)?;
    let game_id = header_rs.column("GAME_ID")?;
    let status = header_rs.optional_column("GAME_STATUS_TEXT");
    let home = header_rs.optional_column("HOME_TEAM_ID");
    let away = header_rs.optional_column("VISITOR_TEAM_ID");
    let start = header_rs.optional_column("GAME_DATE_TIME_UTC");

    let headers = header_rs
        .row_set
        .iter()
        .filter_map(|row| {
            Some(GameHeader {
                game_id: cell_string(row, game_id)?,
                status_text: status.and_then(|i| cell_string(row, i)).unwrap_or_default(),
                home_team_id: home.and_then(|i| cell_u32(row, i)).unwrap_or(0),
                away_team_id: away.and_then(|i| cell_u32(row, i)).unwrap_or(0),
                start_time_utc: start
                    .and_then(|i| cell_string(row, i))
                    .and_then(|s| parse_utc(&s)),
            })
        })
        .collect();

    let line_rs = resp.result_set("LineScore", 1)?;
    let l_game = line_rs.column("GAME_ID")?;
    let l_team = line_rs.column("TEAM_ID")?;
    let l_abbr = line_rs.optional_column("TEAM_ABBREVIATION");
    let l_pts = line_rs.optional_column("PTS");

    let line_scores = line_rs
        .row_set
        .iter()
        .filter_map(|row| {
            let team_id = cell_u32(row, l_team).filter(|id| *id != 0)?;
            Some(LineScore {
                game_id: cell_string(row, l_game)?,
                team_id,
                abbreviation: l_abbr.and_then(|i| cell_string(row, i)).unwrap_or_default(),
                points: l_pts.and_then(|i| cell_u32(row, i)).unwrap_or(0),
            })
        })
        .collect();

    Ok(Scoreboard {
        headers,
        line_scores,
    })
}
