//! Ledger error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Account not found during interest application or retry.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Persisting a posting failed. The caller owns the surrounding
    /// unit of work and must abort it on seeing this.
    #[error("Transaction processing failed: {0}")]
    ProcessingFailed(String),

    /// A retry attempt failed; the transaction is back in `Failed`
    /// state with its attempt counter advanced.
    #[error("Retry of transaction {transaction_id} failed on attempt {attempts}: {reason}")]
    RetryFailed {
        /// The transaction that was being retried.
        transaction_id: Uuid,
        /// Attempts recorded so far, including this one.
        attempts: u32,
        /// What went wrong.
        reason: String,
    },

    /// The transaction has exhausted its retry budget and needs manual
    /// intervention.
    #[error("Transaction {0} has exhausted its retry attempts")]
    AttemptsExhausted(Uuid),

    /// Applying interest to an account failed; the session was rolled
    /// back.
    #[error("Interest application failed: {0}")]
    InterestApplicationFailed(String),
}

impl LedgerError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ProcessingFailed(_) => "TRANSACTION_PROCESSING_FAILED",
            Self::RetryFailed { .. } => "TRANSACTION_RETRY_FAILED",
            Self::AttemptsExhausted(_) => "RETRY_ATTEMPTS_EXHAUSTED",
            Self::InterestApplicationFailed(_) => "INTEREST_APPLICATION_FAILED",
        }
    }
}
