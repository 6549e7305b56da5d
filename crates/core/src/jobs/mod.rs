//! Recurring job orchestration.
//!
//! Schedules are pure values, jobs are synchronous batch bodies, and
//! the runner wires them onto the tokio runtime with a bounded retry
//! per run.

pub mod job;
pub mod runner;
pub mod schedule;
pub mod tasks;

#[cfg(test)]
mod schedule_props;

pub use job::{JobError, JobReport, RecurringJob};
pub use runner::{JobRunner, RetryPolicy, run_once};
pub use schedule::Schedule;
pub use tasks::{
    ContributionValidationJob, EligibilityRefreshJob, FailedTransactionRetryJob,
    InterestAccrualJob,
};
