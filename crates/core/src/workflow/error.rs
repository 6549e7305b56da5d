//! Workflow error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::AccountKind;
use crate::ledger::LedgerError;
use crate::posting::PostingError;
use crate::store::StoreError;

/// Errors that can occur during contribution and withdrawal workflows.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Member not found.
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    /// The member has no pension account of the requested kind.
    #[error("Member {member_id} has no {kind:?} pension account")]
    PensionAccountNotFound {
        /// The member queried.
        member_id: Uuid,
        /// The requested account kind.
        kind: AccountKind,
    },

    /// Contribution not found.
    #[error("Contribution not found: {0}")]
    ContributionNotFound(Uuid),

    /// Member is not eligible for benefits and cannot withdraw.
    #[error("Member {0} is not eligible for benefits")]
    NotEligible(Uuid),

    /// Withdrawal exceeds the account balance.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount requested.
        requested: Decimal,
        /// Balance available.
        available: Decimal,
    },

    /// The selected account is restricted, closed, or inactive.
    #[error("Account {0} cannot receive postings")]
    AccountNotPostable(String),

    /// Bad request input.
    #[error("Validation failure: {0}")]
    Validation(String),

    /// Posting account resolution failed.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// The ledger reported a failure; the unit of work was rolled back.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Unexpected store failure; the unit of work was rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WorkflowError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::PensionAccountNotFound { .. } => "PENSION_ACCOUNT_NOT_FOUND",
            Self::ContributionNotFound(_) => "CONTRIBUTION_NOT_FOUND",
            Self::NotEligible(_) => "NOT_ELIGIBLE",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::AccountNotPostable(_) => "ACCOUNT_NOT_POSTABLE",
            Self::Validation(_) => "VALIDATION_FAILURE",
            Self::Posting(e) => e.code(),
            Self::Ledger(e) => e.code(),
            Self::Store(_) => "SYSTEM_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::member_not_found(WorkflowError::MemberNotFound(Uuid::nil()), "MEMBER_NOT_FOUND")]
    #[case::pension_account_not_found(
        WorkflowError::PensionAccountNotFound {
            member_id: Uuid::nil(),
            kind: AccountKind::IndividualContribution,
        },
        "PENSION_ACCOUNT_NOT_FOUND"
    )]
    #[case::contribution_not_found(
        WorkflowError::ContributionNotFound(Uuid::nil()),
        "CONTRIBUTION_NOT_FOUND"
    )]
    #[case::not_eligible(WorkflowError::NotEligible(Uuid::nil()), "NOT_ELIGIBLE")]
    #[case::insufficient_funds(
        WorkflowError::InsufficientFunds { requested: dec!(600), available: dec!(500) },
        "INSUFFICIENT_FUNDS"
    )]
    #[case::account_not_postable(
        WorkflowError::AccountNotPostable("PA-1".to_string()),
        "ACCOUNT_NOT_POSTABLE"
    )]
    #[case::validation(
        WorkflowError::Validation("amount must be positive".to_string()),
        "VALIDATION_FAILURE"
    )]
    #[case::store(
        WorkflowError::Store(StoreError::Backend("down".to_string())),
        "SYSTEM_ERROR"
    )]
    fn test_error_codes(#[case] err: WorkflowError, #[case] code: &str) {
        assert_eq!(err.code(), code);
    }

    #[test]
    fn test_nested_codes_pass_through() {
        let err = WorkflowError::Ledger(LedgerError::ProcessingFailed("x".to_string()));
        assert_eq!(err.code(), "TRANSACTION_PROCESSING_FAILED");

        let err = WorkflowError::Posting(PostingError::MissingEmployer(Uuid::nil()));
        assert_eq!(err.code(), "MISSING_EMPLOYER");
    }

    #[test]
    fn test_insufficient_funds_display() {
        let err = WorkflowError::InsufficientFunds {
            requested: dec!(600),
            available: dec!(500),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: requested 600, available 500"
        );
    }
}
