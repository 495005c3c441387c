//! League-wide per-game points, rebounds and assists.

use super::common::{JobPhase, JobReport, JobTracker};
use crate::cli::types::Season;
use crate::config::JobSettings;
use crate::nba::adapters::fetch_league_averages;
use crate::nba::StatsApi;
use crate::reconcile::averages;
use crate::storage::IngestDatabase;
use crate::Result;

pub const JOB_NAME: &str = "averages";

pub async fn ingest_averages(
    api: &dyn StatsApi,
    db: &mut IngestDatabase,
    season: Season,
    settings: &JobSettings,
) -> Result<JobReport> {
    let mut job = JobTracker::new(JOB_NAME);

    job.enter(JobPhase::Fetching);
    let rows = fetch_league_averages(api, season, &settings.league)
        .await
        .map_err(|e| job.fail(e))?;

    job.enter(JobPhase::Reconciling);
    let rows = averages(&rows);

    job.enter(JobPhase::Writing);
    let written = db.replace_averages(&rows).map_err(|e| job.fail(e))?;

    Ok(job.finish(written, Vec::new()))
}
