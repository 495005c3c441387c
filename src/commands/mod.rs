//! Ingestion jobs and CLI dispatch
//!
//! Each job module exposes one `ingest_*` function that fetches, reconciles
//! and writes a single data domain; `run_all` sequences them.

pub mod averages;
pub mod common;
pub mod defense;
pub mod games;
pub mod positions;
pub mod run_all;
pub mod usage;


use crate::cli::types::time::{parse_game_date, today};
use crate::cli::{Arrbo, Commands};
use crate::config::{IngestConfig, JobSettings};
use crate::nba::StatsClient;
use crate::storage::IngestDatabase;
use crate::Result;
use defense::BrowserSource;
use run_all::RunAllOptions;
use tracing::info;

pub use common::{JobPhase, JobReport, JobTracker};

/// Resolve configuration, open the store and run the selected command.
pub async fn execute(app: Arrbo) -> Result<()> {
    let common = app.common();
    let headless = match &app.command {
        Commands::DefEff { headless, .. } | Commands::All { headless, .. } => *headless,
        _ => false,
    };
    let config = IngestConfig::from_env(common.db.clone(), headless);
    let season = common.season;

    info!("Using database {}", config.db_path.display());
    let mut db = IngestDatabase::open(&config.db_path)?;
    let api = StatsClient::new(config.stats_base_url.clone())?;
    let settings = JobSettings::default();

    match app.command {
        Commands::Usage { .. } => {
            usage::ingest_usage(&api, &mut db, season, &settings).await?;
        }
        Commands::Positions { .. } => {
            positions::ingest_positions(&api, &mut db, season, &settings).await?;
        }
        Commands::Averages { .. } => {
            averages::ingest_averages(&api, &mut db, season, &settings).await?;
        }
        Commands::DefEff { .. } => {
            let mut source = BrowserSource::new(config.browser);
            defense::ingest_defense_efficiency(&mut source, &mut db, &settings).await?;
        }
        Commands::Games { date, .. } => {
            let date = match date {
                Some(d) => parse_game_date(&d)?,
                None => today(),
            };
            games::ingest_games(&api, &mut db, date, &settings).await?;
        }
        Commands::All { games_days, .. } => {
            let mut source = BrowserSource::new(config.browser);
            let opts = RunAllOptions {
                season,
                start_date: today(),
                games_days,
            };
            run_all::run_all(&api, &mut source, &mut db, &opts, &settings)
                .await
                .into_result()?;
        }
    }

    Ok(())
}
