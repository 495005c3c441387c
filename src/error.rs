//! Error types for the ARRBO ingestion pipeline

use thiserror::Error;


pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Storage error on table {table}: {source}")]
    Storage {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Stats API response has no result set named {name}")]
    MissingResultSet { name: String },

    #[error("Result set {result_set} has no column {column}")]
    MissingColumn { result_set: String, column: String },

    #[error("WebDriver error: {message}")]
    WebDriver { message: String },

    #[error("Scrape error: {message}")]
    Scrape { message: String },

    #[error("Invalid season (expected YYYY-YY): {season}")]
    InvalidSeason { season: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Nothing fetched for {what}; existing rows left in place")]
    NoData { what: String },

    #[error("Tasks failed: {tasks}")]
    TasksFailed { tasks: String },

    #[error("{job} job failed while {phase}: {source}")]
    JobFailed {
        job: String,
        phase: String,
        #[source]
        source: Box<IngestError>,
    },
}

impl IngestError {
    /// Wrap a rusqlite error with the table it was raised against.
    pub fn storage(table: &'static str) -> impl FnOnce(rusqlite::Error) -> IngestError {
        move |source| IngestError::Storage { table, source }
    }
}
