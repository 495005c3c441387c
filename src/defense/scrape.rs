//! Walk every position tab of the defense-vs-position page and collect
//! `(team, column, value)` triples.

use crate::cli::types::{DefensePosition, TeamId};
use crate::core::Pacer;
use crate::defense::table::{DefenseTable, TableRow};
use crate::nba::teams;
use tracing::{debug, info, warn};

/// One scraped value destined for a `defensive_efficiency` column.
///
/// `column` is still an untrusted string here; it only becomes writable once
/// it passes the column allow-list during reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEfficiency {
    pub team_id: TeamId,
    pub column: String,
    pub value: f64,
}

impl RawEfficiency {
    pub fn new(team_id: TeamId, column: &str, value: f64) -> Self {
        Self {
            team_id,
            column: column.to_string(),
            value,
        }
    }
}

/// Outcome of a scrape: the triples plus the tabs that could not be read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeOutcome {
    pub values: Vec<RawEfficiency>,
    pub failed_tabs: Vec<DefensePosition>,
    pub skipped_rows: usize,
}

fn parse_value(text: &str) -> Option<f64> {
    text.trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn row_values(position: DefensePosition, row: &TableRow) -> Option<Vec<RawEfficiency>> {
    let abbr = row.team_abbr.as_deref()?;
    let team = teams::by_abbreviation(abbr)?;
    let value = parse_value(&row.value_text)?;
    Some(
        position
            .efficiency_columns()
            .iter()
            .map(|column| RawEfficiency::new(team.id, column, value))
            .collect(),
    )
}

/// Scrape all five tabs. A tab that fails is logged and skipped; rows with a
/// missing or unknown team, or a non-numeric value, are dropped.
pub async fn scrape_efficiency(table: &mut dyn DefenseTable, pacer: Pacer) -> ScrapeOutcome {
    let mut outcome = ScrapeOutcome::default();

    for position in DefensePosition::ALL {
        let rows = match table.activate_tab(position).await {
            Ok(()) => {
                pacer.pause().await;
                table.read_table().await
            }
            Err(e) => Err(e),
        };
        let rows = match rows {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Skipping {} tab: {}", position, e);
                outcome.failed_tabs.push(position);
                continue;
            }
        };

        let before = outcome.values.len();
        for row in &rows {
            match row_values(position, row) {
                Some(values) => outcome.values.extend(values),
                None => {
                    debug!("Skipping {} row {:?}", position, row);
                    outcome.skipped_rows += 1;
                }
            }
        }
        info!(
            "{} tab: {} rows, {} values",
            position,
            rows.len(),
            outcome.values.len() - before
        );
    }

    outcome
}
