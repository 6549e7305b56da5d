//! Workflow request and result types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountKind, ContributionKind};

/// Request to post a contribution to a member's pension account.
#[derive(Debug, Clone, Deserialize)]
pub struct AddContributionRequest {
    /// Contributing member.
    pub member_id: Uuid,
    /// Contribution amount (must be positive).
    pub amount: Decimal,
    /// Which of the member's accounts receives the contribution.
    pub account_kind: AccountKind,
    /// Contribution kind.
    pub contribution_kind: ContributionKind,
}

/// Result of a successful contribution.
#[derive(Debug, Clone, Serialize)]
pub struct ContributionReceipt {
    /// The created (unvalidated) contribution row.
    pub contribution_id: Uuid,
    /// The completed ledger transaction.
    pub transaction_id: Uuid,
    /// Opaque transaction reference.
    pub reference: String,
    /// Destination pension account number.
    pub account_number: String,
    /// Amount posted.
    pub amount: Decimal,
    /// Account balance after the posting.
    pub new_balance: Decimal,
    /// When the contribution was recorded.
    pub created_at: DateTime<Utc>,
}

/// Request to withdraw from a member's pension account.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalRequest {
    /// Withdrawing member.
    pub member_id: Uuid,
    /// Withdrawal amount (must be positive).
    pub amount: Decimal,
    /// Which of the member's accounts the withdrawal draws from.
    pub account_kind: AccountKind,
}

/// Result of a successful withdrawal.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalReceipt {
    /// The completed ledger transaction.
    pub transaction_id: Uuid,
    /// Opaque transaction reference.
    pub reference: String,
    /// Account balance after the withdrawal.
    pub new_balance: Decimal,
    /// When the withdrawal was processed.
    pub processed_at: DateTime<Utc>,
}

/// Why a contribution could not be validated.
///
/// These are reconciliation outcomes, not errors: the validation job
/// reports them and moves on to the next candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRejection {
    /// No ledger transaction references the contribution.
    MissingTransaction,
    /// A transaction exists but is not `Completed`.
    TransactionNotCompleted,
}

impl ValidationRejection {
    /// Human-readable description for alerts.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingTransaction => "no ledger transaction recorded for contribution",
            Self::TransactionNotCompleted => "ledger transaction has not completed",
        }
    }
}

/// Outcome of reconciling one contribution against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The contribution matched a completed transaction and was marked
    /// validated.
    Validated,
    /// The contribution could not be validated.
    Rejected(ValidationRejection),
}
