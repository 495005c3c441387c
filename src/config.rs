//! Runtime configuration resolved from CLI flags and the environment.

use crate::cli::DB_ENV_VAR;
use crate::core::{Pacer, RetryPolicy};
use crate::nba::adapters::FetchOptions;
use crate::nba::http::STATS_BASE_URL;
use std::path::PathBuf;
use std::time::Duration;

pub const STATS_BASE_URL_ENV_VAR: &str = "ARRBO_STATS_BASE_URL";
pub const WEBDRIVER_URL_ENV_VAR: &str = "CHROMEDRIVER_URL";
pub const CHROME_BIN_ENV_VAR: &str = "CHROME_BIN";
pub const DEFENSE_URL_ENV_VAR: &str = "ARRBO_DEFENSE_URL";

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const DEFAULT_CHROME_BIN: &str = "/usr/bin/chromium";
pub const DEFAULT_DEFENSE_URL: &str = "https://draftedge.com/nba/nba-defense-vs-position/";

/// How long to wait for page elements to render.
pub const PAGE_WAIT_TIMEOUT: Duration = Duration::from_secs(20);

/// Per-command timeout for WebDriver requests.
pub const WEBDRIVER_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Browser session settings for the defense scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    /// `None` lets chromedriver pick its default browser.
    pub chrome_binary: Option<String>,
    pub headless: bool,
    pub page_url: String,
    pub wait_timeout: Duration,
    pub command_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    pub db_path: PathBuf,
    pub stats_base_url: String,
    pub browser: BrowserConfig,
}

impl IngestConfig {
    /// Resolve from the process environment.
    pub fn from_env(db: Option<PathBuf>, headless: bool) -> Self {
        Self::resolve(db, headless, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit variable lookup. Empty values count as unset.
    pub fn resolve<F>(db: Option<PathBuf>, headless: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = db
            .or_else(|| var(DB_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(default_db_path);

        Self {
            db_path,
            stats_base_url: var(STATS_BASE_URL_ENV_VAR)
                .unwrap_or_else(|| STATS_BASE_URL.to_string()),
            browser: BrowserConfig {
                webdriver_url: var(WEBDRIVER_URL_ENV_VAR)
                    .unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string()),
                chrome_binary: Some(
                    var(CHROME_BIN_ENV_VAR).unwrap_or_else(|| DEFAULT_CHROME_BIN.to_string()),
                ),
                headless,
                page_url: var(DEFENSE_URL_ENV_VAR)
                    .unwrap_or_else(|| DEFAULT_DEFENSE_URL.to_string()),
                wait_timeout: PAGE_WAIT_TIMEOUT,
                command_timeout: WEBDRIVER_COMMAND_TIMEOUT,
            },
        }
    }
}

/// `<data dir>/arrbo/arrbo.db`, or `./arrbo.db` when there is no data dir.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("arrbo").join("arrbo.db"))
        .unwrap_or_else(|| PathBuf::from("arrbo.db"))
}

/// Pacing, retry and timeout knobs for every job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobSettings {
    pub league: FetchOptions,
    pub roster: FetchOptions,
    pub scoreboard: FetchOptions,
    /// Pause between consecutive teams and before each table read.
    pub between_teams: Pacer,
    /// Pause after the defense page first loads.
    pub page_settle: Pacer,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            league: FetchOptions::LEAGUE,
            roster: FetchOptions::ROSTER,
            scoreboard: FetchOptions::SCOREBOARD,
            between_teams: Pacer::BETWEEN_TEAMS,
            page_settle: Pacer::PAGE_SETTLE,
        }
    }
}

impl JobSettings {
    /// No pacing and no backoff sleeps; attempt counts are kept.
    pub fn immediate() -> Self {
        let quick = |opts: FetchOptions| FetchOptions {
            retry: RetryPolicy::new(opts.retry.attempts, Duration::ZERO)
                .with_jitter(Duration::ZERO),
            pacer: Pacer::NONE,
            timeout: opts.timeout,
        };
        Self {
            league: quick(FetchOptions::LEAGUE),
            roster: quick(FetchOptions::ROSTER),
            scoreboard: quick(FetchOptions::SCOREBOARD),
            between_teams: Pacer::NONE,
            page_settle: Pacer::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = IngestConfig::resolve(None, true, lookup(&[]));
        assert_eq!(config.db_path, default_db_path());
        assert_eq!(config.stats_base_url, STATS_BASE_URL);
        assert_eq!(config.browser.webdriver_url, DEFAULT_WEBDRIVER_URL);
        assert_eq!(config.browser.chrome_binary.as_deref(), Some(DEFAULT_CHROME_BIN));
        assert_eq!(config.browser.page_url, DEFAULT_DEFENSE_URL);
        assert_eq!(config.browser.wait_timeout, Duration::from_secs(20));
        assert!(config.browser.headless);
    }

    #[test]
    fn test_flag_beats_environment() {
        let config = IngestConfig::resolve(
            Some(PathBuf::from("/tmp/flag.db")),
            false,
            lookup(&[(DB_ENV_VAR, "/tmp/env.db")]),
        );
        assert_eq!(config.db_path, PathBuf::from("/tmp/flag.db"));
    }

    #[test]
    fn test_environment_overrides() {
        let config = IngestConfig::resolve(
            None,
            false,
            lookup(&[
                (DB_ENV_VAR, "/tmp/env.db"),
                (STATS_BASE_URL_ENV_VAR, "http://127.0.0.1:8080/stats"),
                (WEBDRIVER_URL_ENV_VAR, "http://chromedriver:4444"),
                (CHROME_BIN_ENV_VAR, "/opt/chrome/chrome"),
                (DEFENSE_URL_ENV_VAR, ""),
            ]),
        );
        assert_eq!(config.db_path, PathBuf::from("/tmp/env.db"));
        assert_eq!(config.stats_base_url, "http://127.0.0.1:8080/stats");
        assert_eq!(config.browser.webdriver_url, "http://chromedriver:4444");
        assert_eq!(config.browser.chrome_binary.as_deref(), Some("/opt/chrome/chrome"));
        assert_eq!(config.browser.page_url, DEFAULT_DEFENSE_URL);
    }

    #[test]
    fn test_default_db_path_file_name() {
        assert!(default_db_path().ends_with("arrbo.db"));
    }

    #[test]
    fn test_immediate_settings_keep_attempts() {
        let settings = JobSettings::immediate();
        assert_eq!(settings.roster.retry.attempts, 4);
        assert_eq!(settings.league.retry.base_sleep, Duration::ZERO);
        assert_eq!(settings.between_teams, Pacer::NONE);
    }
}
