//! Data models for the storage layer

use crate::cli::types::{EfficiencyColumn, RosterPosition, TeamId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Most columns a `top_usage_players` row can hold.
pub const MAX_USAGE_SLOTS: usize = 5;

/// Team reference row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team_id: TeamId,
    pub abbreviation: String,
    pub nba_team_id: u32,
}

/// One player and their usage percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSlot {
    pub player_name: String,
    pub usage: f64,
}

impl UsageSlot {
    pub fn new(player_name: &str, usage: f64) -> Self {
        Self {
            player_name: player_name.to_string(),
            usage,
        }
    }
}

/// Highest-usage players of one team, ordered by usage descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUsagePlayer {
    pub team_id: TeamId,
    pub players: Vec<UsageSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPosition {
    pub player_name: String,
    pub player_position: String,
}

impl PlayerPosition {
    pub fn new(player_name: &str, position: RosterPosition) -> Self {
        Self {
            player_name: player_name.to_string(),
            player_position: position.to_string(),
        }
    }
}

/// Per-game points, rebounds, assists and their sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAverages {
    pub player_name: String,
    pub player_pts: f64,
    pub player_reb: f64,
    pub player_ast: f64,
    pub player_pra: f64,
}

impl PlayerAverages {
    /// Build averages; PRA is always derived, never taken from upstream.
    pub fn new(player_name: &str, pts: f64, reb: f64, ast: f64) -> Self {
        Self {
            player_name: player_name.to_string(),
            player_pts: pts,
            player_reb: reb,
            player_ast: ast,
            player_pra: pts + reb + ast,
        }
    }
}

/// Points allowed relative to league average, by opposing position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefensiveEfficiency {
    pub team_id: TeamId,
    pub pg_efficiency: Option<f64>,
    pub sg_efficiency: Option<f64>,
    pub sf_efficiency: Option<f64>,
    pub pf_efficiency: Option<f64>,
    pub c_efficiency: Option<f64>,
}

/// One scheduled or finished game. Team ids are the stats service's ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: String,
    pub game_date: NaiveDate,
    pub start_time_utc: Option<DateTime<Utc>>,
    pub status_text: String,
    pub home_team_id: u32,
    pub home_team_abbr: String,
    pub home_team_score: u32,
    pub away_team_id: u32,
    pub away_team_abbr: String,
    pub away_team_score: u32,
}

/// A single validated `defensive_efficiency` cell write
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyUpdate {
    pub team_id: TeamId,
    pub column: EfficiencyColumn,
    pub value: f64,
}
