//! Run every ingestion job in order, then games for a window of days.
//!
//! Tasks are independent: a failed task is recorded and the next one still
//! runs. The run as a whole fails if any task failed.

use super::common::JobReport;
use super::{averages, defense, games, positions, usage};
use crate::cli::types::Season;
use crate::config::JobSettings;
use crate::nba::StatsApi;
use crate::storage::IngestDatabase;
use crate::{IngestError, Result};
use chrono::{Duration, NaiveDate};
use defense::EfficiencySource;
use tracing::{error, info};

/// Inputs for a full run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunAllOptions {
    pub season: Season,
    /// First day of the games window.
    pub start_date: NaiveDate,
    /// Days of games to ingest; values below 1 are treated as 1.
    pub games_days: u32,
}

impl RunAllOptions {
    pub fn game_dates(&self) -> Vec<NaiveDate> {
        (0..self.games_days.max(1))
            .map(|i| self.start_date + Duration::days(i64::from(i)))
            .collect()
    }
}

/// Outcome of one task of a full run.
#[derive(Debug)]
pub struct TaskResult {
    pub task: String,
    pub outcome: Result<JobReport>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub tasks: Vec<TaskResult>,
}

impl RunSummary {
    fn record(&mut self, task: String, outcome: Result<JobReport>) {
        match &outcome {
            Ok(report) => info!("[{}] ok: {} rows", task, report.rows_written),
            Err(e) => error!("[{}] failed: {}", task, e),
        }
        self.tasks.push(TaskResult { task, outcome });
    }

    pub fn is_success(&self) -> bool {
        self.tasks.iter().all(|t| t.outcome.is_ok())
    }

    pub fn failed_tasks(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| t.outcome.is_err())
            .map(|t| t.task.as_str())
            .collect()
    }

    /// Every report when all tasks succeeded, else an error naming the
    /// failed tasks.
    pub fn into_result(self) -> Result<Vec<JobReport>> {
        let failed = self.failed_tasks();
        if !failed.is_empty() {
            return Err(IngestError::TasksFailed {
                tasks: failed.join(", "),
            });
        }
        Ok(self
            .tasks
            .into_iter()
            .filter_map(|t| t.outcome.ok())
            .collect())
    }
}

pub async fn run_all(
    api: &dyn StatsApi,
    defense_source: &mut dyn EfficiencySource,
    db: &mut IngestDatabase,
    opts: &RunAllOptions,
    settings: &JobSettings,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let season = opts.season;

    info!("Running all jobs for {}", season);

    let outcome = usage::ingest_usage(api, db, season, settings).await;
    summary.record(usage::JOB_NAME.to_string(), outcome);

    let outcome = positions::ingest_positions(api, db, season, settings).await;
    summary.record(positions::JOB_NAME.to_string(), outcome);

    let outcome = averages::ingest_averages(api, db, season, settings).await;
    summary.record(averages::JOB_NAME.to_string(), outcome);

    let outcome = defense::ingest_defense_efficiency(defense_source, db, settings).await;
    summary.record(defense::JOB_NAME.to_string(), outcome);

    for date in opts.game_dates() {
        let outcome = games::ingest_games(api, db, date, settings).await;
        summary.record(format!("{} {}", games::JOB_NAME, date), outcome);
    }

    summary
}
