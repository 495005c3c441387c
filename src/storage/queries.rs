//! Read-back queries over the ingested tables

use super::{models::*, schema::IngestDatabase, writer::DATE_FORMAT};
use crate::cli::types::TeamId;
use crate::error::{IngestError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{types::Type, Row};

fn conversion_error<E>(idx: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

impl IngestDatabase {
    pub fn teams(&self) -> Result<Vec<TeamRecord>> {
        const TABLE: &str = "nba_teams";
        let mut stmt = self
            .conn
            .prepare("SELECT team_id, abbreviation, nba_team_id FROM nba_teams ORDER BY team_id")
            .map_err(IngestError::storage(TABLE))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TeamRecord {
                    team_id: TeamId::new(row.get(0)?),
                    abbreviation: row.get(1)?,
                    nba_team_id: row.get(2)?,
                })
            })
            .map_err(IngestError::storage(TABLE))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(IngestError::storage(TABLE))
    }

    pub fn top_usage_players(&self) -> Result<Vec<TopUsagePlayer>> {
        const TABLE: &str = "top_usage_players";
        let mut stmt = self
            .conn
            .prepare(
                "SELECT team_id,
                    player1_name, player1_usage, player2_name, player2_usage,
                    player3_name, player3_usage, player4_name, player4_usage,
                    player5_name, player5_usage
                 FROM top_usage_players ORDER BY team_id",
            )
            .map_err(IngestError::storage(TABLE))?;
        let rows = stmt
            .query_map([], |row| {
                let mut players = Vec::new();
                for slot in 0..MAX_USAGE_SLOTS {
                    let name: Option<String> = row.get(1 + slot * 2)?;
                    let usage: Option<f64> = row.get(2 + slot * 2)?;
                    if let (Some(name), Some(usage)) = (name, usage) {
                        players.push(UsageSlot::new(&name, usage));
                    }
                }
                Ok(TopUsagePlayer {
                    team_id: TeamId::new(row.get(0)?),
                    players,
                })
            })
            .map_err(IngestError::storage(TABLE))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(IngestError::storage(TABLE))
    }

    /// Positions in insertion order
    pub fn positions(&self) -> Result<Vec<PlayerPosition>> {
        const TABLE: &str = "positions";
        let mut stmt = self
            .conn
            .prepare("SELECT player_name, player_position FROM positions ORDER BY id")
            .map_err(IngestError::storage(TABLE))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PlayerPosition {
                    player_name: row.get(0)?,
                    player_position: row.get(1)?,
                })
            })
            .map_err(IngestError::storage(TABLE))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(IngestError::storage(TABLE))
    }

    /// Averages in insertion order
    pub fn averages(&self) -> Result<Vec<PlayerAverages>> {
        const TABLE: &str = "averages";
        let mut stmt = self
            .conn
            .prepare(
                "SELECT player_name, player_pts, player_reb, player_ast, player_pra
                 FROM averages ORDER BY id",
            )
            .map_err(IngestError::storage(TABLE))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PlayerAverages {
                    player_name: row.get(0)?,
                    player_pts: row.get(1)?,
                    player_reb: row.get(2)?,
                    player_ast: row.get(3)?,
                    player_pra: row.get(4)?,
                })
            })
            .map_err(IngestError::storage(TABLE))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(IngestError::storage(TABLE))
    }

    pub fn defensive_efficiency(&self) -> Result<Vec<DefensiveEfficiency>> {
        const TABLE: &str = "defensive_efficiency";
        let mut stmt = self
            .conn
            .prepare(
                "SELECT team_id, pg_efficiency, sg_efficiency, sf_efficiency,
                        pf_efficiency, c_efficiency
                 FROM defensive_efficiency ORDER BY team_id",
            )
            .map_err(IngestError::storage(TABLE))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DefensiveEfficiency {
                    team_id: TeamId::new(row.get(0)?),
                    pg_efficiency: row.get(1)?,
                    sg_efficiency: row.get(2)?,
                    sf_efficiency: row.get(3)?,
                    pf_efficiency: row.get(4)?,
                    c_efficiency: row.get(5)?,
                })
            })
            .map_err(IngestError::storage(TABLE))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(IngestError::storage(TABLE))
    }

    /// Games on one date, ordered by game id
    pub fn games_on(&self, date: NaiveDate) -> Result<Vec<Game>> {
        const TABLE: &str = "games";
        let mut stmt = self
            .conn
            .prepare(
                "SELECT game_id, game_date, start_time_utc, status_text,
                        home_team_id, home_team_abbr, home_team_score,
                        away_team_id, away_team_abbr, away_team_score
                 FROM games WHERE game_date = ?1 ORDER BY game_id",
            )
            .map_err(IngestError::storage(TABLE))?;
        let rows = stmt
            .query_map([date.format(DATE_FORMAT).to_string()], row_to_game)
            .map_err(IngestError::storage(TABLE))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(IngestError::storage(TABLE))
    }

    /// Total rows in one of the ingested tables.
    pub fn row_count(&self, table: &'static str) -> Result<usize> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .map_err(IngestError::storage(table))
    }
}

fn row_to_game(row: &Row<'_>) -> rusqlite::Result<Game> {
    let game_date: String = row.get(1)?;
    let start_time: Option<String> = row.get(2)?;
    Ok(Game {
        game_id: row.get(0)?,
        game_date: NaiveDate::parse_from_str(&game_date, DATE_FORMAT)
            .map_err(|e| conversion_error(1, e))?,
        start_time_utc: start_time
            .map(|s| DateTime::parse_from_rfc3339(&s).map(|t| t.with_timezone(&Utc)))
            .transpose()
            .map_err(|e| conversion_error(2, e))?,
        status_text: row.get(3)?,
        home_team_id: row.get(4)?,
        home_team_abbr: row.get(5)?,
        home_team_score: row.get(6)?,
        away_team_id: row.get(7)?,
        away_team_abbr: row.get(8)?,
        away_team_score: row.get(9)?,
    })
}
