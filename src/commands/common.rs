//! Job lifecycle shared by every ingestion command.
//!
//! A job moves `Pending → Fetching → Reconciling → Writing → Done`, or to
//! `Failed` from whichever phase hit an unrecoverable error. Each transition
//! is logged, and a failure is wrapped with the job name and phase.

use crate::error::IngestError;
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Pending,
    Fetching,
    Reconciling,
    Writing,
    Done,
    Failed,
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobPhase::Pending => "pending",
            JobPhase::Fetching => "fetching",
            JobPhase::Reconciling => "reconciling",
            JobPhase::Writing => "writing",
            JobPhase::Done => "done",
            JobPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// What a finished job did.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub job: String,
    pub phase: JobPhase,
    pub rows_written: usize,
    /// Keys (external team ids, tab labels) that were soft-skipped.
    pub skipped: Vec<String>,
}

/// Tracks one job through its phases.
#[derive(Debug)]
pub struct JobTracker {
    job: String,
    phase: JobPhase,
}

impl JobTracker {
    pub fn new(job: &str) -> Self {
        info!("{}: {}", job, JobPhase::Pending);
        Self {
            job: job.to_string(),
            phase: JobPhase::Pending,
        }
    }

    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn enter(&mut self, phase: JobPhase) {
        info!("{}: {} -> {}", self.job, self.phase, phase);
        self.phase = phase;
    }

    /// Mark the job failed and wrap `source` with the phase it failed in.
    pub fn fail(&mut self, source: IngestError) -> IngestError {
        let phase = self.phase;
        error!("{}: failed while {}: {}", self.job, phase, source);
        self.phase = JobPhase::Failed;
        IngestError::JobFailed {
            job: self.job.clone(),
            phase: phase.to_string(),
            source: Box::new(source),
        }
    }

    /// Log a soft failure that does not stop the job.
    pub fn soft_failure(&self, key: &str, cause: &IngestError) {
        warn!("{}: skipping {}: {}", self.job, key, cause);
    }

    pub fn finish(mut self, rows_written: usize, skipped: Vec<String>) -> JobReport {
        self.enter(JobPhase::Done);
        if skipped.is_empty() {
            info!("{}: wrote {} rows", self.job, rows_written);
        } else {
            info!(
                "{}: wrote {} rows, skipped {}: {}",
                self.job,
                rows_written,
                skipped.len(),
                skipped.join(",")
            );
        }
        JobReport {
            job: self.job,
            phase: self.phase,
            rows_written,
            skipped,
        }
    }
}
