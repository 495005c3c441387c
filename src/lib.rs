//! ARRBO Ingestion Library
//!
//! Idempotent jobs that pull basketball statistics from unreliable upstream
//! sources, reconcile them against current rosters and team reference data,
//! and atomically replace or upsert them into a SQLite store read by the
//! dashboard.
//!
//! ## Jobs
//!
//! - **Usage**: top two usage players per team, restricted to the current roster
//! - **Positions**: one roster position per player, merged across teams
//! - **Averages**: per-game points, rebounds, assists and PRA
//! - **Defensive efficiency**: points allowed by opposing position, scraped
//!   through a WebDriver-controlled browser
//! - **Games**: scoreboard for a date, upserted by game id
//!
//! Every remote call is paced and retried with bounded exponential backoff.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arrbo_ingest::{
//!     commands::usage::ingest_usage, config::JobSettings, nba::StatsClient,
//!     storage::IngestDatabase, Season,
//! };
//!
//! # async fn example() -> arrbo_ingest::Result<()> {
//! let api = StatsClient::new("https://stats.nba.com/stats")?;
//! let mut db = IngestDatabase::open(std::path::Path::new("arrbo.db"))?;
//!
//! let report = ingest_usage(&api, &mut db, Season::current(), &JobSettings::default()).await?;
//! println!("{} teams written", report.rows_written);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export ARRBO_DB=/var/lib/arrbo/arrbo.db
//! export CHROMEDRIVER_URL=http://localhost:9515
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod defense;
pub mod error;
pub mod nba;
pub mod reconcile;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{DefensePosition, EfficiencyColumn, NbaTeamId, RosterPosition, Season, TeamId};
pub use error::{IngestError, Result};
