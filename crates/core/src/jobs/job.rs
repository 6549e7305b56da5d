//! The recurring job contract.

use thiserror::Error;

use super::schedule::Schedule;
use crate::store::StoreError;
use crate::workflow::WorkflowError;

/// Aggregate counts from one job run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobReport {
    /// Items handled successfully.
    pub processed: usize,
    /// Items that failed and were skipped.
    pub failed: usize,
}

/// A job run failed before it could work through its candidates.
///
/// Per-item failures do not surface here; jobs log them and continue.
#[derive(Debug, Error)]
pub enum JobError {
    /// Candidate selection through the workflow layer failed.
    #[error("candidate query failed: {0}")]
    Workflow(#[from] WorkflowError),

    /// Candidate selection against the store failed.
    #[error("candidate query failed: {0}")]
    Store(#[from] StoreError),
}

/// A unit of scheduled batch work.
///
/// Implementations are synchronous; the runner moves each run onto a
/// blocking thread.
pub trait RecurringJob: Send + Sync {
    /// Stable job name, used in log context.
    fn name(&self) -> &'static str;

    /// When the job fires.
    fn schedule(&self) -> Schedule;

    /// Runs one batch. A failed item must not stop the batch.
    fn run(&self) -> Result<JobReport, JobError>;
}
