//! The scheduled batch jobs.
//!
//! Each job selects its candidates, works through them one at a time,
//! and keeps going past per-item failures. Notifications are best
//! effort and never fail a run.

use std::sync::Arc;

use chrono::Duration;
use tracing::{error, warn};
use uuid::Uuid;

use super::job::{JobError, JobReport, RecurringJob};
use super::schedule::Schedule;
use crate::config::FundConfig;
use crate::eligibility::EligibilityEngine;
use crate::ledger::{TransactionLedger, monthly_interest};
use crate::store::{FundStore, NotificationDispatcher, NotifyError};
use crate::workflow::{ContributionWorkflow, ValidationOutcome};

fn notify(member_id: Uuid, result: Result<(), NotifyError>) {
    if let Err(err) = result {
        warn!(member_id = %member_id, error = %err, "notification dispatch failed");
    }
}

/// Daily sweep that validates recent contributions against the ledger.
pub struct ContributionValidationJob {
    workflow: Arc<ContributionWorkflow>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl ContributionValidationJob {
    /// Creates the job over its collaborators.
    #[must_use]
    pub fn new(
        workflow: Arc<ContributionWorkflow>,
        notifier: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self { workflow, notifier }
    }
}

impl RecurringJob for ContributionValidationJob {
    fn name(&self) -> &'static str {
        "contribution-validation"
    }

    fn schedule(&self) -> Schedule {
        Schedule::Daily { hour: 2, minute: 0 }
    }

    fn run(&self) -> Result<JobReport, JobError> {
        let candidates = self.workflow.unvalidated_contributions()?;
        let mut report = JobReport::default();
        for contribution in candidates {
            match self.workflow.validate_contribution(contribution.id) {
                Ok(ValidationOutcome::Validated) => report.processed += 1,
                Ok(ValidationOutcome::Rejected(rejection)) => {
                    report.failed += 1;
                    notify(
                        contribution.member_id,
                        self.notifier.send_validation_alert(
                            contribution.member_id,
                            &format!(
                                "Contribution {} could not be validated: {}",
                                contribution.id,
                                rejection.description()
                            ),
                        ),
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    error!(
                        contribution_id = %contribution.id,
                        error = %err,
                        "contribution validation failed"
                    );
                }
            }
        }
        Ok(report)
    }
}

/// Monthly refresh of eligibility for members inside the approaching
/// window.
pub struct EligibilityRefreshJob {
    workflow: Arc<ContributionWorkflow>,
    engine: Arc<EligibilityEngine>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl EligibilityRefreshJob {
    /// Creates the job over its collaborators.
    #[must_use]
    pub fn new(
        workflow: Arc<ContributionWorkflow>,
        engine: Arc<EligibilityEngine>,
        notifier: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            workflow,
            engine,
            notifier,
        }
    }
}

impl RecurringJob for EligibilityRefreshJob {
    fn name(&self) -> &'static str {
        "eligibility-refresh"
    }

    fn schedule(&self) -> Schedule {
        Schedule::MonthlyOnDay {
            day: 1,
            hour: 3,
            minute: 0,
        }
    }

    fn run(&self) -> Result<JobReport, JobError> {
        let candidates = self.workflow.eligibility_candidates()?;
        let mut report = JobReport::default();
        for member in candidates {
            match self.engine.recalculate(member.id) {
                Ok(outcome) => {
                    report.processed += 1;
                    if outcome.newly_eligible {
                        notify(
                            member.id,
                            self.notifier.send_eligibility_notification(
                                member.id,
                                "You are now eligible for retirement benefits",
                            ),
                        );
                    }
                }
                Err(err) => {
                    report.failed += 1;
                    error!(
                        member_id = %member.id,
                        error = %err,
                        "eligibility recalculation failed"
                    );
                }
            }
        }
        Ok(report)
    }
}

/// Monthly interest accrual over qualifying account balances.
pub struct InterestAccrualJob {
    workflow: Arc<ContributionWorkflow>,
    ledger: Arc<TransactionLedger>,
    store: Arc<dyn FundStore>,
    notifier: Arc<dyn NotificationDispatcher>,
    config: Arc<FundConfig>,
}

impl InterestAccrualJob {
    /// Creates the job over its collaborators.
    #[must_use]
    pub fn new(
        workflow: Arc<ContributionWorkflow>,
        ledger: Arc<TransactionLedger>,
        store: Arc<dyn FundStore>,
        notifier: Arc<dyn NotificationDispatcher>,
        config: Arc<FundConfig>,
    ) -> Self {
        Self {
            workflow,
            ledger,
            store,
            notifier,
            config,
        }
    }
}

impl RecurringJob for InterestAccrualJob {
    fn name(&self) -> &'static str {
        "interest-accrual"
    }

    fn schedule(&self) -> Schedule {
        Schedule::MonthlyOnDay {
            day: 28,
            hour: 4,
            minute: 0,
        }
    }

    fn run(&self) -> Result<JobReport, JobError> {
        let accounts = self.workflow.interest_eligible_accounts()?;
        let mut report = JobReport::default();
        for account in accounts {
            let amount = monthly_interest(
                account.current_balance,
                self.config.annual_interest_rate_percent,
            );
            match self
                .ledger
                .apply_interest(&*self.store, account.id, account.member_id, amount)
            {
                Ok(_) => {
                    report.processed += 1;
                    notify(
                        account.member_id,
                        self.notifier.send_interest_notification(
                            account.member_id,
                            &format!(
                                "Interest of {amount} applied to account {}",
                                account.account_number
                            ),
                        ),
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    error!(
                        account_id = %account.id,
                        error = %err,
                        "interest application failed"
                    );
                }
            }
        }
        Ok(report)
    }
}

/// Half-hourly retry sweep over failed ledger transactions.
pub struct FailedTransactionRetryJob {
    ledger: Arc<TransactionLedger>,
    store: Arc<dyn FundStore>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl FailedTransactionRetryJob {
    /// Creates the job over its collaborators.
    #[must_use]
    pub fn new(
        ledger: Arc<TransactionLedger>,
        store: Arc<dyn FundStore>,
        notifier: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            ledger,
            store,
            notifier,
        }
    }
}

impl RecurringJob for FailedTransactionRetryJob {
    fn name(&self) -> &'static str {
        "failed-transaction-retry"
    }

    fn schedule(&self) -> Schedule {
        Schedule::Every(Duration::minutes(30))
    }

    fn run(&self) -> Result<JobReport, JobError> {
        let candidates = self.ledger.failed_candidates(&*self.store)?;
        let mut report = JobReport::default();
        for txn in candidates {
            match self.ledger.retry_failed(&*self.store, txn.id) {
                Ok(completed) => {
                    report.processed += 1;
                    notify(
                        completed.member_id,
                        self.notifier.send_transaction_alert(
                            completed.member_id,
                            &format!("Transaction {} completed after retry", completed.reference),
                        ),
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    error!(
                        transaction_id = %txn.id,
                        error = %err,
                        "transaction retry failed"
                    );
                    notify(
                        txn.member_id,
                        self.notifier.send_transaction_alert(
                            txn.member_id,
                            &format!("Transaction {} could not be retried", txn.reference),
                        ),
                    );
                }
            }
        }
        Ok(report)
    }
}
