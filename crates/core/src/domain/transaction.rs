//! Ledger transactions and posting account pairs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a fund movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money into the fund from a member or employer.
    Contribution,
    /// Money out of the fund to a member.
    Withdrawal,
    /// Interest credited to a pension account.
    Interest,
    /// Reversal of an earlier movement.
    Refund,
}

/// Completion state of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Recorded but not yet processed.
    Pending,
    /// Processed successfully (terminal unless reversed).
    Completed,
    /// Processing failed; retryable while attempts remain.
    Failed,
    /// Reversed after completion. Modeled but not reachable from any
    /// current operation; refunds are recorded as `Refund` transactions.
    Reversed,
}

impl TransactionStatus {
    /// Returns true if no further automatic processing applies.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Reversed)
    }
}

/// The resolved (debit, credit) bank-account pair used to record one
/// ledger transaction. Transient; consumed immediately by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingAccounts {
    /// Account debited (money leaves it).
    pub debit_account: String,
    /// Bank holding the debit account.
    pub debit_bank: String,
    /// Account credited (money enters it).
    pub credit_account: String,
    /// Bank holding the credit account.
    pub credit_bank: String,
}

impl PostingAccounts {
    /// Returns the pair with debit and credit sides exchanged.
    ///
    /// Withdrawals reuse the contribution resolution with the flow
    /// direction reversed: money leaves the fund.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            debit_account: self.credit_account,
            debit_bank: self.credit_bank,
            credit_account: self.debit_account,
            credit_bank: self.debit_bank,
        }
    }
}

/// The ledger record of a single fund movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// The transaction ID.
    pub id: Uuid,
    /// Account debited.
    pub debit_account: String,
    /// Bank holding the debit account.
    pub debit_bank: String,
    /// Account credited.
    pub credit_account: String,
    /// Bank holding the credit account.
    pub credit_bank: String,
    /// Member this movement belongs to.
    pub member_id: Uuid,
    /// Originating contribution, when the movement is a contribution.
    pub contribution_id: Option<Uuid>,
    /// Movement classification.
    pub kind: TransactionKind,
    /// Amount moved.
    pub amount: Decimal,
    /// Completion state.
    pub status: TransactionStatus,
    /// Processing attempts so far. Reaching the configured cap
    /// permanently excludes the transaction from retry candidacy.
    pub attempts: u32,
    /// Opaque reference number.
    pub reference: String,
    /// When the movement was recorded.
    pub transaction_date: DateTime<Utc>,
    /// When processing completed, if it has.
    pub processed_at: Option<DateTime<Utc>>,
    /// Whether the movement has been reversed.
    pub is_reversed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swapped_exchanges_sides() {
        let posting = PostingAccounts {
            debit_account: "D".to_string(),
            debit_bank: "DB".to_string(),
            credit_account: "C".to_string(),
            credit_bank: "CB".to_string(),
        };
        let swapped = posting.clone().swapped();
        assert_eq!(swapped.debit_account, "C");
        assert_eq!(swapped.debit_bank, "CB");
        assert_eq!(swapped.credit_account, "D");
        assert_eq!(swapped.credit_bank, "DB");
        assert_eq!(swapped.swapped(), posting);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TransactionStatus::Completed.is_terminal());
        assert!(TransactionStatus::Reversed.is_terminal());
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(!TransactionStatus::Failed.is_terminal());
    }
}
