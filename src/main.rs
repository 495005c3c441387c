//! Entry point: parse CLI, set up logging and dispatch to the ingestion jobs.

use anyhow::Context;
use arrbo_ingest::{cli::Arrbo, commands, core::logging};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

/// Run the CLI.
#[tokio::main]
async fn main() -> ExitCode {
    let app = Arrbo::parse();
    logging::init(&app.common().log_level);

    match run(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(app: Arrbo) -> anyhow::Result<()> {
    let command = app.command.name();
    commands::execute(app)
        .await
        .with_context(|| format!("{command} failed"))
}
