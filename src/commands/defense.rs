//! Defensive efficiency by opposing position, scraped from a browser page.

use super::common::{JobPhase, JobReport, JobTracker};
use crate::config::{BrowserConfig, JobSettings};
use crate::defense::{scrape_efficiency, DefenseTable, ScrapeOutcome, WebDriverSession};
use crate::reconcile::efficiency_updates;
use crate::storage::IngestDatabase;
use crate::{IngestError, Result};
use async_trait::async_trait;
use tracing::warn;

pub const JOB_NAME: &str = "defense-efficiency";

/// Produces the scraped efficiency triples for one run.
#[async_trait]
pub trait EfficiencySource: Send {
    async fn collect(&mut self, settings: &JobSettings) -> Result<ScrapeOutcome>;
}

/// Opens a fresh browser session per run and always closes it.
pub struct BrowserSource {
    pub browser: BrowserConfig,
}

impl BrowserSource {
    pub fn new(browser: BrowserConfig) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl EfficiencySource for BrowserSource {
    async fn collect(&mut self, settings: &JobSettings) -> Result<ScrapeOutcome> {
        let mut session = WebDriverSession::start(&self.browser).await?;

        let result: Result<ScrapeOutcome> = async {
            session.open(&self.browser.page_url).await?;
            settings.page_settle.pause().await;
            Ok(scrape_efficiency(&mut session, settings.between_teams).await)
        }
        .await;

        if let Err(e) = session.quit().await {
            warn!("Failed to close browser session: {}", e);
        }
        result
    }
}

/// Scrapes a table that is already open.
pub struct TableSource<'a> {
    pub table: &'a mut dyn DefenseTable,
}

#[async_trait]
impl EfficiencySource for TableSource<'_> {
    async fn collect(&mut self, settings: &JobSettings) -> Result<ScrapeOutcome> {
        Ok(scrape_efficiency(&mut *self.table, settings.between_teams).await)
    }
}

pub async fn ingest_defense_efficiency(
    source: &mut dyn EfficiencySource,
    db: &mut IngestDatabase,
    settings: &JobSettings,
) -> Result<JobReport> {
    let mut job = JobTracker::new(JOB_NAME);

    job.enter(JobPhase::Fetching);
    let outcome = source.collect(settings).await.map_err(|e| job.fail(e))?;

    job.enter(JobPhase::Reconciling);
    let updates = efficiency_updates(&outcome.values);
    if updates.is_empty() {
        return Err(job.fail(IngestError::NoData {
            what: "defense-vs-position tabs".to_string(),
        }));
    }

    job.enter(JobPhase::Writing);
    let written = db
        .replace_defensive_efficiency(&updates)
        .map_err(|e| job.fail(e))?;

    let skipped = outcome
        .failed_tabs
        .iter()
        .map(|tab| tab.to_string())
        .collect();
    Ok(job.finish(written, skipped))
}
