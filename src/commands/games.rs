//! Games for one calendar date from the scoreboard.

use super::common::{JobPhase, JobReport, JobTracker};
use crate::config::JobSettings;
use crate::nba::adapters::fetch_scoreboard;
use crate::nba::StatsApi;
use crate::reconcile::join_games;
use crate::storage::IngestDatabase;
use crate::Result;
use chrono::NaiveDate;

pub const JOB_NAME: &str = "games";

pub async fn ingest_games(
    api: &dyn StatsApi,
    db: &mut IngestDatabase,
    date: NaiveDate,
    settings: &JobSettings,
) -> Result<JobReport> {
    let mut job = JobTracker::new(&format!("{JOB_NAME} {date}"));

    job.enter(JobPhase::Fetching);
    let scoreboard = fetch_scoreboard(api, date, &settings.scoreboard)
        .await
        .map_err(|e| job.fail(e))?;

    job.enter(JobPhase::Reconciling);
    let games = join_games(date, &scoreboard);

    job.enter(JobPhase::Writing);
    let written = db
        .upsert_games_for_date(date, &games)
        .map_err(|e| job.fail(e))?;

    Ok(job.finish(written, Vec::new()))
}
