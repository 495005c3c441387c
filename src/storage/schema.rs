//! Database schema and connection management

use crate::error::{IngestError, Result};
use crate::nba::TEAMS;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

/// Database connection manager for ingested data
pub struct IngestDatabase {
    pub(crate) conn: Connection,
}

impl IngestDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(path).map_err(IngestError::storage("connection"))?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Fresh in-memory database with schema and team seed applied
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(IngestError::storage("connection"))?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS nba_teams (
                    team_id INTEGER PRIMARY KEY,
                    abbreviation TEXT NOT NULL,
                    nba_team_id INTEGER NOT NULL UNIQUE
                );

                CREATE TABLE IF NOT EXISTS top_usage_players (
                    team_id INTEGER PRIMARY KEY REFERENCES nba_teams(team_id),
                    player1_name TEXT, player1_usage REAL,
                    player2_name TEXT, player2_usage REAL,
                    player3_name TEXT, player3_usage REAL,
                    player4_name TEXT, player4_usage REAL,
                    player5_name TEXT, player5_usage REAL
                );

                CREATE TABLE IF NOT EXISTS positions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    player_name TEXT NOT NULL UNIQUE,
                    player_position TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS averages (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    player_name TEXT NOT NULL,
                    player_pts REAL NOT NULL,
                    player_reb REAL NOT NULL,
                    player_ast REAL NOT NULL,
                    player_pra REAL NOT NULL
                );

                CREATE TABLE IF NOT EXISTS defensive_efficiency (
                    team_id INTEGER PRIMARY KEY REFERENCES nba_teams(team_id),
                    pg_efficiency REAL,
                    sg_efficiency REAL,
                    sf_efficiency REAL,
                    pf_efficiency REAL,
                    c_efficiency REAL
                );

                CREATE TABLE IF NOT EXISTS games (
                    game_id TEXT PRIMARY KEY,
                    game_date TEXT NOT NULL,
                    start_time_utc TEXT,
                    status_text TEXT NOT NULL,
                    home_team_id INTEGER NOT NULL,
                    home_team_abbr TEXT NOT NULL,
                    home_team_score INTEGER NOT NULL,
                    away_team_id INTEGER NOT NULL,
                    away_team_abbr TEXT NOT NULL,
                    away_team_score INTEGER NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_games_date ON games(game_date);",
            )
            .map_err(IngestError::storage("schema"))?;

        self.seed_teams()
    }

    /// Seed the team reference table. Existing rows are left alone.
    fn seed_teams(&mut self) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(IngestError::storage("nba_teams"))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR IGNORE INTO nba_teams (team_id, abbreviation, nba_team_id)
                     VALUES (?1, ?2, ?3)",
                )
                .map_err(IngestError::storage("nba_teams"))?;
            for team in TEAMS.iter() {
                stmt.execute(params![
                    team.id.as_u8(),
                    team.abbreviation,
                    team.nba_id.as_u32()
                ])
                .map_err(IngestError::storage("nba_teams"))?;
            }
        }
        tx.commit().map_err(IngestError::storage("nba_teams"))
    }
}
