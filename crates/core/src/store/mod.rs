//! Collaborator contracts the core depends on but does not implement.
//!
//! Persistence is an abstract transactional session ([`FundStore`] /
//! [`StoreTx`]); caching and notification transport are narrow traits.
//! The `fundra-store` crate ships the reference in-memory/moka/tracing
//! implementations.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    Account, BenefitEligibility, BenefitType, Contribution, EligibilityRule, Employer,
    LedgerTransaction, Member,
};

/// Errors surfaced by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store rejected or failed an operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// Internal store invariant violation.
    #[error("store internal error: {0}")]
    Internal(String),
}

/// Entry point to the persisted fund state.
///
/// `begin` opens a transactional session; candidate-set queries used by
/// the recurring jobs read committed state directly.
pub trait FundStore: Send + Sync {
    /// Opens a transactional session.
    fn begin(&self) -> Result<Box<dyn StoreTx + '_>, StoreError>;

    /// Unvalidated contributions created at or after `cutoff`.
    fn unvalidated_contributions_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Contribution>, StoreError>;

    /// Active members born on or before `born_before` that are not yet
    /// eligible for benefits.
    fn members_approaching_eligibility(
        &self,
        born_before: NaiveDate,
    ) -> Result<Vec<Member>, StoreError>;

    /// Active, unrestricted, open accounts with a balance at or above
    /// `minimum_balance`.
    fn interest_eligible_accounts(
        &self,
        minimum_balance: Decimal,
    ) -> Result<Vec<Account>, StoreError>;

    /// Failed transactions with fewer than `max_attempts` attempts:
    /// the retry candidate set.
    fn failed_transactions(&self, max_attempts: u32)
    -> Result<Vec<LedgerTransaction>, StoreError>;
}

/// A transactional session over the fund store.
///
/// All mutations staged through a session become durable only on
/// [`StoreTx::commit`]. Implementations must roll back on drop, so any
/// early return from a workflow discards staged writes.
pub trait StoreTx {
    /// Loads a member by id.
    fn member(&mut self, id: Uuid) -> Result<Option<Member>, StoreError>;

    /// Loads all pension accounts of a member.
    fn member_accounts(&mut self, member_id: Uuid) -> Result<Vec<Account>, StoreError>;

    /// Loads an employer by id.
    fn employer(&mut self, id: Uuid) -> Result<Option<Employer>, StoreError>;

    /// Loads an account by id.
    fn account(&mut self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Loads an account by pension account number.
    fn account_by_number(&mut self, number: &str) -> Result<Option<Account>, StoreError>;

    /// Persists an updated member.
    fn update_member(&mut self, member: &Member) -> Result<(), StoreError>;

    /// Persists an updated account.
    fn update_account(&mut self, account: &Account) -> Result<(), StoreError>;

    /// Stages a new contribution row.
    fn insert_contribution(&mut self, contribution: &Contribution) -> Result<(), StoreError>;

    /// Loads a contribution by id.
    fn contribution(&mut self, id: Uuid) -> Result<Option<Contribution>, StoreError>;

    /// Persists an updated contribution.
    fn update_contribution(&mut self, contribution: &Contribution) -> Result<(), StoreError>;

    /// All contributions of one member.
    fn member_contributions(&mut self, member_id: Uuid)
    -> Result<Vec<Contribution>, StoreError>;

    /// Stages a new ledger transaction.
    fn insert_transaction(&mut self, transaction: &LedgerTransaction)
    -> Result<(), StoreError>;

    /// Loads a transaction by id.
    fn transaction(&mut self, id: Uuid) -> Result<Option<LedgerTransaction>, StoreError>;

    /// The transaction recorded for a contribution, if any.
    fn transaction_for_contribution(
        &mut self,
        contribution_id: Uuid,
    ) -> Result<Option<LedgerTransaction>, StoreError>;

    /// Persists an updated transaction.
    fn update_transaction(&mut self, transaction: &LedgerTransaction)
    -> Result<(), StoreError>;

    /// All eligibility rules, in seeded order.
    fn eligibility_rules(&mut self) -> Result<Vec<EligibilityRule>, StoreError>;

    /// The persisted eligibility outcome for a (member, benefit) pair.
    fn benefit_eligibility(
        &mut self,
        member_id: Uuid,
        benefit: BenefitType,
    ) -> Result<Option<BenefitEligibility>, StoreError>;

    /// Stages a new eligibility outcome row.
    fn insert_benefit_eligibility(
        &mut self,
        row: &BenefitEligibility,
    ) -> Result<(), StoreError>;

    /// Persists an updated eligibility outcome row.
    fn update_benefit_eligibility(
        &mut self,
        row: &BenefitEligibility,
    ) -> Result<(), StoreError>;

    /// Commits staged writes.
    fn commit(self: Box<Self>) -> Result<(), StoreError>;

    /// Discards staged writes. Dropping an uncommitted session has the
    /// same effect.
    fn rollback(self: Box<Self>);
}

/// Read-through cache keyed by member-scoped strings.
///
/// The core only invalidates after successful mutations; population is
/// left to the read paths of whatever surface sits above the core.
pub trait MemberCache: Send + Sync {
    /// Returns the cached value for `key`, populating it from `factory`
    /// on a miss.
    fn get_or_set(
        &self,
        key: &str,
        factory: &dyn Fn() -> serde_json::Value,
    ) -> serde_json::Value;

    /// Drops the entry for `key`, if present.
    fn remove(&self, key: &str);
}

/// Cache key for a member's profile and accounts.
#[must_use]
pub fn member_key(member_id: Uuid) -> String {
    format!("member_{member_id}")
}

/// Cache key for a member's eligibility snapshot.
#[must_use]
pub fn eligibility_key(member_id: Uuid) -> String {
    format!("eligibility_{member_id}")
}

/// Cache key for a member's benefit records.
#[must_use]
pub fn benefits_key(member_id: Uuid) -> String {
    format!("benefits_{member_id}")
}

/// Failure reported by a notification transport.
#[derive(Debug, Error)]
#[error("notification dispatch failed: {0}")]
pub struct NotifyError(pub String);

/// Fire-and-forget member notification transport (email/SMS).
///
/// Dispatch failures are logged by callers, never propagated into
/// business results.
pub trait NotificationDispatcher: Send + Sync {
    /// Alert about a contribution that failed validation.
    fn send_validation_alert(&self, member_id: Uuid, message: &str) -> Result<(), NotifyError>;

    /// Notify a member of an eligibility change.
    fn send_eligibility_notification(
        &self,
        member_id: Uuid,
        message: &str,
    ) -> Result<(), NotifyError>;

    /// Notify a member of interest credited to their account.
    fn send_interest_notification(
        &self,
        member_id: Uuid,
        message: &str,
    ) -> Result<(), NotifyError>;

    /// Alert about a transaction outcome (retry completion or failure).
    fn send_transaction_alert(&self, member_id: Uuid, message: &str) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys_are_member_scoped() {
        let id = Uuid::nil();
        assert_eq!(
            member_key(id),
            "member_00000000-0000-0000-0000-000000000000"
        );
        assert!(eligibility_key(id).starts_with("eligibility_"));
        assert!(benefits_key(id).starts_with("benefits_"));
    }
}
