//! Write operations. Every method runs in one transaction: on error nothing
//! is committed and the previous contents stay in place.

use super::{models::*, schema::IngestDatabase};
use crate::error::{IngestError, Result};
use chrono::{NaiveDate, SecondsFormat};
use rusqlite::{params, Transaction};
use std::collections::BTreeSet;
use tracing::debug;

/// Text format of `games.game_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clear a table and restart its AUTOINCREMENT counter.
fn clear_table(tx: &Transaction<'_>, table: &'static str) -> Result<()> {
    tx.execute(&format!("DELETE FROM {table}"), [])
        .map_err(IngestError::storage(table))?;
    tx.execute("DELETE FROM sqlite_sequence WHERE name = ?1", [table])
        .map_err(IngestError::storage(table))?;
    Ok(())
}

impl IngestDatabase {
    /// Replace every `top_usage_players` row. Slots beyond the fifth are ignored.
    pub fn replace_top_usage(&mut self, rows: &[TopUsagePlayer]) -> Result<usize> {
        const TABLE: &str = "top_usage_players";
        let tx = self.conn.transaction().map_err(IngestError::storage(TABLE))?;
        clear_table(&tx, TABLE)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO top_usage_players (team_id,
                        player1_name, player1_usage, player2_name, player2_usage,
                        player3_name, player3_usage, player4_name, player4_usage,
                        player5_name, player5_usage)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                )
                .map_err(IngestError::storage(TABLE))?;

            for row in rows {
                let slot = |i: usize| row.players.get(i);
                let name = |i: usize| slot(i).map(|s| s.player_name.as_str());
                let usage = |i: usize| slot(i).map(|s| s.usage);
                stmt.execute(params![
                    row.team_id.as_u8(),
                    name(0),
                    usage(0),
                    name(1),
                    usage(1),
                    name(2),
                    usage(2),
                    name(3),
                    usage(3),
                    name(4),
                    usage(4),
                ])
                .map_err(IngestError::storage(TABLE))?;
            }
        }
        tx.commit().map_err(IngestError::storage(TABLE))?;
        debug!("Replaced {} rows in {}", rows.len(), TABLE);
        Ok(rows.len())
    }

    pub fn replace_positions(&mut self, rows: &[PlayerPosition]) -> Result<usize> {
        const TABLE: &str = "positions";
        let tx = self.conn.transaction().map_err(IngestError::storage(TABLE))?;
        clear_table(&tx, TABLE)?;
        {
            let mut stmt = tx
                .prepare("INSERT INTO positions (player_name, player_position) VALUES (?1, ?2)")
                .map_err(IngestError::storage(TABLE))?;
            for row in rows {
                stmt.execute(params![row.player_name, row.player_position])
                    .map_err(IngestError::storage(TABLE))?;
            }
        }
        tx.commit().map_err(IngestError::storage(TABLE))?;
        debug!("Replaced {} rows in {}", rows.len(), TABLE);
        Ok(rows.len())
    }

    pub fn replace_averages(&mut self, rows: &[PlayerAverages]) -> Result<usize> {
        const TABLE: &str = "averages";
        let tx = self.conn.transaction().map_err(IngestError::storage(TABLE))?;
        clear_table(&tx, TABLE)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO averages (player_name, player_pts, player_reb, player_ast, player_pra)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(IngestError::storage(TABLE))?;
            for row in rows {
                stmt.execute(params![
                    row.player_name,
                    row.player_pts,
                    row.player_reb,
                    row.player_ast,
                    row.player_pra
                ])
                .map_err(IngestError::storage(TABLE))?;
            }
        }
        tx.commit().map_err(IngestError::storage(TABLE))?;
        debug!("Replaced {} rows in {}", rows.len(), TABLE);
        Ok(rows.len())
    }

    /// Clear the table, insert one NULL skeleton row per team that has
    /// updates, then apply each update to its column. Returns the number of
    /// cells written.
    pub fn replace_defensive_efficiency(&mut self, updates: &[EfficiencyUpdate]) -> Result<usize> {
        const TABLE: &str = "defensive_efficiency";
        let teams: BTreeSet<_> = updates.iter().map(|u| u.team_id).collect();

        let tx = self.conn.transaction().map_err(IngestError::storage(TABLE))?;
        clear_table(&tx, TABLE)?;
        {
            let mut skeleton = tx
                .prepare("INSERT OR IGNORE INTO defensive_efficiency (team_id) VALUES (?1)")
                .map_err(IngestError::storage(TABLE))?;
            for team_id in &teams {
                skeleton
                    .execute([team_id.as_u8()])
                    .map_err(IngestError::storage(TABLE))?;
            }

            for update in updates {
                // Column names come from the closed EfficiencyColumn set only.
                let sql = format!(
                    "UPDATE defensive_efficiency SET {} = ?1 WHERE team_id = ?2",
                    update.column.column_name()
                );
                tx.prepare_cached(&sql)
                    .and_then(|mut stmt| stmt.execute(params![update.value, update.team_id.as_u8()]))
                    .map_err(IngestError::storage(TABLE))?;
            }
        }
        tx.commit().map_err(IngestError::storage(TABLE))?;
        debug!(
            "Wrote {} cells for {} teams in {}",
            updates.len(),
            teams.len(),
            TABLE
        );
        Ok(updates.len())
    }

    /// Delete every game on `date`, then upsert `games` by game id. Other
    /// dates are left untouched.
    pub fn upsert_games_for_date(&mut self, date: NaiveDate, games: &[Game]) -> Result<usize> {
        const TABLE: &str = "games";
        let tx = self.conn.transaction().map_err(IngestError::storage(TABLE))?;
        let removed = tx
            .execute(
                "DELETE FROM games WHERE game_date = ?1",
                [date.format(DATE_FORMAT).to_string()],
            )
            .map_err(IngestError::storage(TABLE))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO games (game_id, game_date, start_time_utc, status_text,
                        home_team_id, home_team_abbr, home_team_score,
                        away_team_id, away_team_abbr, away_team_score)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                     ON CONFLICT(game_id) DO UPDATE SET
                        game_date = excluded.game_date,
                        start_time_utc = excluded.start_time_utc,
                        status_text = excluded.status_text,
                        home_team_id = excluded.home_team_id,
                        home_team_abbr = excluded.home_team_abbr,
                        home_team_score = excluded.home_team_score,
                        away_team_id = excluded.away_team_id,
                        away_team_abbr = excluded.away_team_abbr,
                        away_team_score = excluded.away_team_score",
                )
                .map_err(IngestError::storage(TABLE))?;

            for game in games {
                stmt.execute(params![
                    game.game_id,
                    game.game_date.format(DATE_FORMAT).to_string(),
                    game.start_time_utc
                        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
                    game.status_text,
                    game.home_team_id,
                    game.home_team_abbr,
                    game.home_team_score,
                    game.away_team_id,
                    game.away_team_abbr,
                    game.away_team_score,
                ])
                .map_err(IngestError::storage(TABLE))?;
            }
        }
        tx.commit().map_err(IngestError::storage(TABLE))?;
        debug!(
            "Games for {}: removed {}, upserted {}",
            date,
            removed,
            games.len()
        );
        Ok(games.len())
    }
}
