//! Pension accounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::MemberStatus;

/// Kind of pension account a member holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Funded by the member's own voluntary payments.
    IndividualContribution,
    /// Funded by a sponsoring employer.
    EmployerSponsoredPension,
}

/// Lifecycle status of a pension account.
pub type AccountStatus = MemberStatus;

/// A member's pension account.
///
/// Invariant: `current_balance` changes only inside a committed store
/// session driven by a ledger-confirmed transaction. Restricted or closed
/// accounts are never eligible destinations for postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The account ID.
    pub id: Uuid,
    /// Owning member.
    pub member_id: Uuid,
    /// Sponsoring employer, for employer-sponsored accounts.
    pub employer_id: Option<Uuid>,
    /// Pension account number (opaque, unique).
    pub account_number: String,
    /// Account kind.
    pub kind: AccountKind,
    /// Count of contributions posted to this account.
    pub total_contributions: u32,
    /// Current balance.
    pub current_balance: Decimal,
    /// Whether the account is administratively restricted.
    pub is_restricted: bool,
    /// Whether the account has been closed.
    pub is_closed: bool,
    /// Lifecycle status.
    pub status: AccountStatus,
}

impl Account {
    /// Returns true if the account may receive ledger postings.
    #[must_use]
    pub fn is_postable(&self) -> bool {
        self.status == AccountStatus::Active && !self.is_restricted && !self.is_closed
    }
}
