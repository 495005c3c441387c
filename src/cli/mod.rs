//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::Season;

/// Environment variable consulted when `--db` is not given.
pub const DB_ENV_VAR: &str = "ARRBO_DB";

/// Arguments shared by every ingestion job.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// SQLite database path (or set `ARRBO_DB`).
    #[clap(long, env = DB_ENV_VAR)]
    pub db: Option<PathBuf>,

    /// Season like 2025-26 (default: the season in progress).
    #[clap(long, short, default_value_t = Season::default())]
    pub season: Season,

    /// Log level: debug | info | warn | error (overridden by `RUST_LOG`).
    #[clap(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Parser)]
#[clap(name = "arrbo-ingest", about = "ARRBO ingestion service")]
pub struct Arrbo {
    #[clap(subcommand)]
    pub command: Commands,
}

impl Arrbo {
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Commands::Usage { common }
            | Commands::Positions { common }
            | Commands::Averages { common }
            | Commands::DefEff { common, .. }
            | Commands::Games { common, .. }
            | Commands::All { common, .. } => common,
        }
    }
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Usage { .. } => "usage",
            Commands::Positions { .. } => "positions",
            Commands::Averages { .. } => "averages",
            Commands::DefEff { .. } => "def-eff",
            Commands::Games { .. } => "games",
            Commands::All { .. } => "all",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ingest the top two usage players per team.
    Usage {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Ingest player positions from every team roster.
    Positions {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Ingest per-game scoring, rebounding and assist averages.
    Averages {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Scrape defensive efficiency by position.
    #[clap(name = "def-eff", alias = "defense-efficiency")]
    DefEff {
        #[clap(flatten)]
        common: CommonArgs,

        /// Run the browser headless.
        #[clap(long)]
        headless: bool,
    },

    /// Ingest games for one date from the scoreboard.
    Games {
        #[clap(flatten)]
        common: CommonArgs,

        /// Game date in YYYY-MM-DD (default: today).
        #[clap(long)]
        date: Option<String>,
    },

    /// Run every ingestion job, then games for a window of days.
    All {
        #[clap(flatten)]
        common: CommonArgs,

        /// Run the browser headless.
        #[clap(long)]
        headless: bool,

        /// How many days of games to ingest starting today (2 = today + tomorrow).
        #[clap(long, default_value_t = 2)]
        games_days: u32,
    },
}
