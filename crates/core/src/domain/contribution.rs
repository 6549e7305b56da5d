//! Contribution records pending reconciliation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of contribution a member makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionKind {
    /// Recurring monthly contribution; counted by the
    /// minimum-contributions eligibility rule.
    Monthly,
    /// One-off voluntary top-up.
    Voluntary,
}

/// A member's deposit into a pension account.
///
/// Created unvalidated by the workflow; the validation job later
/// reconciles it against a `Completed` ledger transaction and flips
/// `is_validated`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    /// The contribution ID.
    pub id: Uuid,
    /// Contributing member.
    pub member_id: Uuid,
    /// Contribution amount.
    pub amount: Decimal,
    /// Destination pension account number.
    pub account_number: String,
    /// Contribution kind.
    pub kind: ContributionKind,
    /// Whether the contribution has been reconciled against a completed
    /// ledger transaction.
    pub is_validated: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
