//! Async job runner.
//!
//! One tokio task per registered job. Each loop sleeps until the next
//! scheduled fire time, then executes the run on a blocking thread
//! with a bounded retry. A run that keeps failing is dropped; the loop
//! waits for the next fire time rather than falling behind.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::job::RecurringJob;

/// How many times a single run is attempted before it is dropped.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum attempts per run, at least 1.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Owns the registered jobs and spawns their scheduling loops.
pub struct JobRunner {
    jobs: Vec<Arc<dyn RecurringJob>>,
    policy: RetryPolicy,
}

impl JobRunner {
    /// Creates an empty runner with the given retry policy.
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            jobs: Vec::new(),
            policy,
        }
    }

    /// Registers a job with the runner.
    pub fn register(&mut self, job: Arc<dyn RecurringJob>) {
        self.jobs.push(job);
    }

    /// Spawns one scheduling loop per registered job.
    ///
    /// The loops run until their handles are aborted or the runtime
    /// shuts down.
    #[must_use]
    pub fn spawn_all(self) -> Vec<JoinHandle<()>> {
        let policy = self.policy;
        self.jobs
            .into_iter()
            .map(|job| tokio::spawn(run_loop(job, policy)))
            .collect()
    }
}

async fn run_loop(job: Arc<dyn RecurringJob>, policy: RetryPolicy) {
    loop {
        let now = Utc::now();
        let next = job.schedule().next_occurrence(now);
        let delay = (next - now).to_std().unwrap_or(StdDuration::ZERO);
        debug!(job = job.name(), next = %next, "sleeping until next run");
        tokio::time::sleep(delay).await;

        let worker = Arc::clone(&job);
        let outcome = tokio::task::spawn_blocking(move || run_once(&*worker, policy)).await;
        if outcome.is_err() {
            error!(job = job.name(), "job run panicked");
        }
    }
}

/// Executes one run with the bounded retry the policy allows.
pub fn run_once(job: &dyn RecurringJob, policy: RetryPolicy) {
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        match job.run() {
            Ok(report) => {
                info!(
                    job = job.name(),
                    processed = report.processed,
                    failed = report.failed,
                    "job run complete"
                );
                return;
            }
            Err(err) => {
                warn!(job = job.name(), attempt, error = %err, "job run failed");
            }
        }
    }
    error!(job = job.name(), attempts, "job run dropped after exhausting retries");
}
