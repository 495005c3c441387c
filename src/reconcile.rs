//! Per-domain reconciliation of fetched rows into storage rows.
//!
//! Everything here is pure: no I/O, no persistent state.

use crate::cli::types::{EfficiencyColumn, RosterPosition};
use crate::defense::RawEfficiency;
use crate::nba::types::{AveragesRow, RosterEntry, Scoreboard, UsageRow};
use crate::nba::Team;
use crate::storage::{
    EfficiencyUpdate, Game, PlayerAverages, PlayerPosition, TopUsagePlayer, UsageSlot,
};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};


/// Players kept per team in `top_usage_players`.
pub const TOP_USAGE_COUNT: usize = 2;

/// Accepted usage percentage range.
pub const USAGE_RANGE: (f64, f64) = (0.0, 100.0);

/// Accepted defensive efficiency range.
pub const EFFICIENCY_RANGE: (f64, f64) = (0.0, 200.0);

fn in_range(value: f64, (lo, hi): (f64, f64)) -> bool {
    value.is_finite() && value >= lo && value <= hi
}

/// Pick a team's top-usage players among those on its current roster.
///
/// Returns `None` when fewer than [`TOP_USAGE_COUNT`] players qualify; the
/// team is then left out of the refresh.
pub fn top_usage(
    team: &Team,
    roster_names: &HashSet<String>,
    rows: &[UsageRow],
) -> Option<TopUsagePlayer> {
    let mut candidates: Vec<&UsageRow> = rows
        .iter()
        .filter(|row| row.nba_team_id == team.nba_id)
        .filter(|row| roster_names.contains(&row.player_name))
        .filter(|row| in_range(row.usage, USAGE_RANGE))
        .collect();

    candidates.sort_by(|a, b| b.usage.partial_cmp(&a.usage).unwrap_or(Ordering::Equal));

    if candidates.len() < TOP_USAGE_COUNT {
        debug!(
            "Team {} has {} eligible players, skipping",
            team.abbreviation,
            candidates.len()
        );
        return None;
    }

    Some(TopUsagePlayer {
        team_id: team.id,
        players: candidates
            .into_iter()
            .take(TOP_USAGE_COUNT)
            .map(|row| UsageSlot::new(&row.player_name, row.usage))
            .collect(),
    })
}

/// Merge per-team rosters into one position per player.
///
/// A player seen on several rosters keeps the last position seen, in the
/// slot where they first appeared. Entries with no recognisable position
/// are dropped.
pub fn merge_positions<I>(rosters: I) -> Vec<PlayerPosition>
where
    I: IntoIterator<Item = Vec<RosterEntry>>,
{
    let mut merged: Vec<PlayerPosition> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in rosters.into_iter().flatten() {
        let Some(position) = entry
            .position
            .as_deref()
            .and_then(|p| p.parse::<RosterPosition>().ok())
        else {
            debug!("Dropping {}: no usable position {:?}", entry.player_name, entry.position);
            continue;
        };

        let row = PlayerPosition::new(&entry.player_name, position);
        match index.get(&entry.player_name) {
            Some(&i) => merged[i] = row,
            None => {
                index.insert(entry.player_name.clone(), merged.len());
                merged.push(row);
            }
        }
    }

    merged
}

/// Per-game averages with PRA derived; rows with a negative stat are dropped.
pub fn averages(rows: &[AveragesRow]) -> Vec<PlayerAverages> {
    rows.iter()
        .filter(|row| {
            let ok = [row.points, row.rebounds, row.assists]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0);
            if !ok {
                debug!("Dropping averages row for {}", row.player_name);
            }
            ok
        })
        .map(|row| PlayerAverages::new(&row.player_name, row.points, row.rebounds, row.assists))
        .collect()
}

/// Validate scraped triples against the column allow-list and value range.
/// Rejected triples are logged and do not affect the ones after them.
pub fn efficiency_updates(raw: &[RawEfficiency]) -> Vec<EfficiencyUpdate> {
    raw.iter()
        .filter_map(|triple| {
            let column = match triple.column.parse::<EfficiencyColumn>() {
                Ok(column) => column,
                Err(_) => {
                    warn!(
                        "Ignoring value for unknown column {:?} (team {})",
                        triple.column, triple.team_id
                    );
                    return None;
                }
            };
            if !in_range(triple.value, EFFICIENCY_RANGE) {
                warn!(
                    "Ignoring out-of-range {} {} for team {}",
                    column, triple.value, triple.team_id
                );
                return None;
            }
            Some(EfficiencyUpdate {
                team_id: triple.team_id,
                column,
                value: triple.value,
            })
        })
        .collect()
}

type LineKey<'a> = (&'a str, u32);

fn side<'a>(
    lines: &HashMap<LineKey<'a>, (&'a str, u32)>,
    game_id: &'a str,
    team_id: u32,
) -> (String, u32) {
    lines
        .get(&(game_id, team_id))
        .map(|(abbr, pts)| (abbr.to_string(), *pts))
        .unwrap_or_default()
}

/// One game per scoreboard header, joined with its two line scores.
/// A side with no matching line score gets an empty abbreviation and 0 points.
pub fn join_games(date: NaiveDate, scoreboard: &Scoreboard) -> Vec<Game> {
    let lines: HashMap<LineKey<'_>, (&str, u32)> = scoreboard
        .line_scores
        .iter()
        .map(|ls| {
            (
                (ls.game_id.as_str(), ls.team_id),
                (ls.abbreviation.as_str(), ls.points),
            )
        })
        .collect();

    scoreboard
        .headers
        .iter()
        .map(|header| {
            let (home_abbr, home_score) = side(&lines, &header.game_id, header.home_team_id);
            let (away_abbr, away_score) = side(&lines, &header.game_id, header.away_team_id);
            Game {
                game_id: header.game_id.clone(),
                game_date: date,
                start_time_utc: header.start_time_utc,
                status_text: header.status_text.clone(),
                home_team_id: header.home_team_id,
                home_team_abbr: home_abbr,
                home_team_score: home_score,
                away_team_id: header.away_team_id,
                away_team_abbr: away_abbr,
                away_team_score: away_score,
            }
        })
        .collect()
}
