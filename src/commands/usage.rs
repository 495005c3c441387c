//! Top-usage players per team, restricted to each team's current roster.

use super::common::{JobPhase, JobReport, JobTracker};
use crate::cli::types::Season;
use crate::config::JobSettings;
use crate::nba::adapters::{fetch_league_usage, fetch_team_roster};
use crate::nba::{StatsApi, TEAMS};
use crate::reconcile::top_usage;
use crate::storage::IngestDatabase;
use crate::{IngestError, Result};
use std::collections::HashSet;

pub const JOB_NAME: &str = "usage";

pub async fn ingest_usage(
    api: &dyn StatsApi,
    db: &mut IngestDatabase,
    season: Season,
    settings: &JobSettings,
) -> Result<JobReport> {
    let mut job = JobTracker::new(JOB_NAME);
    let mut skipped = Vec::new();

    job.enter(JobPhase::Fetching);
    let rows = fetch_league_usage(api, season, &settings.league)
        .await
        .map_err(|e| job.fail(e))?;

    let mut rosters = Vec::with_capacity(TEAMS.len());
    for team in TEAMS.iter() {
        match fetch_team_roster(api, team, season, &settings.roster).await {
            Ok(entries) => {
                let names: HashSet<String> = entries.into_iter().map(|e| e.player_name).collect();
                rosters.push((team, names));
            }
            Err(e) => {
                job.soft_failure(&team.nba_id.to_string(), &e);
                skipped.push(team.nba_id.to_string());
            }
        }
        settings.between_teams.pause().await;
    }

    if rosters.is_empty() {
        return Err(job.fail(IngestError::NoData {
            what: "team rosters".to_string(),
        }));
    }

    job.enter(JobPhase::Reconciling);
    let mut top = Vec::with_capacity(rosters.len());
    for (team, names) in &rosters {
        match top_usage(team, names, &rows) {
            Some(row) => top.push(row),
            None => skipped.push(team.nba_id.to_string()),
        }
    }

    job.enter(JobPhase::Writing);
    let written = db.replace_top_usage(&top).map_err(|e| job.fail(e))?;

    Ok(job.finish(written, skipped))
}
