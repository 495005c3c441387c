//! Player positions merged from every team roster.

use super::common::{JobPhase, JobReport, JobTracker};
use crate::cli::types::Season;
use crate::config::JobSettings;
use crate::nba::adapters::fetch_team_roster;
use crate::nba::{StatsApi, TEAMS};
use crate::reconcile::merge_positions;
use crate::storage::IngestDatabase;
use crate::{IngestError, Result};

pub const JOB_NAME: &str = "positions";

pub async fn ingest_positions(
    api: &dyn StatsApi,
    db: &mut IngestDatabase,
    season: Season,
    settings: &JobSettings,
) -> Result<JobReport> {
    let mut job = JobTracker::new(JOB_NAME);
    let mut skipped = Vec::new();

    job.enter(JobPhase::Fetching);
    let mut rosters = Vec::with_capacity(TEAMS.len());
    for team in TEAMS.iter() {
        match fetch_team_roster(api, team, season, &settings.roster).await {
            Ok(entries) => rosters.push(entries),
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
    let positions = merge_positions(rosters);

    job.enter(JobPhase::Writing);
    let written = db.replace_positions(&positions).map_err(|e| job.fail(e))?;

    Ok(job.finish(written, skipped))
}
