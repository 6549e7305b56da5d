//! In-memory transactional store.
//!
//! One mutex guards the whole fund state; a session clones a snapshot
//! at `begin` and restores it on drop unless committed. That gives the
//! same discard-on-early-return behavior the core expects from a real
//! database transaction, at single-process scale.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use fundra_core::config::FundConfig;
use fundra_core::domain::{
    Account, BenefitEligibility, BenefitType, Contribution, EligibilityRule, Employer,
    LedgerTransaction, Member, MemberStatus, TransactionStatus,
};
use fundra_core::store::{FundStore, StoreError, StoreTx};

#[derive(Debug, Default, Clone)]
struct State {
    members: HashMap<Uuid, Member>,
    employers: HashMap<Uuid, Employer>,
    accounts: HashMap<Uuid, Account>,
    contributions: HashMap<Uuid, Contribution>,
    transactions: HashMap<Uuid, LedgerTransaction>,
    rules: Vec<EligibilityRule>,
    eligibility: HashMap<Uuid, BenefitEligibility>,
}

/// Single-process reference store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    reject_postings: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store with no rules seeded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the standard retirement rule set:
    /// minimum age from the config, twelve validated monthly
    /// contributions, and one active account.
    #[must_use]
    pub fn with_default_rules(config: &FundConfig) -> Self {
        let store = Self::new();
        store.seed_rule(EligibilityRule {
            id: Uuid::new_v4(),
            rule_name: "MinimumAge".to_string(),
            description: format!(
                "Member must be at least {} years old",
                config.minimum_eligibility_age
            ),
            benefit_type: BenefitType::Retirement,
            threshold: Some(Decimal::from(config.minimum_eligibility_age)),
            is_boolean: false,
            evaluation_order: 1,
            is_active: true,
            error_code: "ELIG_AGE".to_string(),
        });
        store.seed_rule(EligibilityRule {
            id: Uuid::new_v4(),
            rule_name: "MinimumContributions".to_string(),
            description: "Member must have at least 12 validated monthly contributions"
                .to_string(),
            benefit_type: BenefitType::Retirement,
            threshold: Some(Decimal::from(12)),
            is_boolean: false,
            evaluation_order: 2,
            is_active: true,
            error_code: "ELIG_CONTRIB".to_string(),
        });
        store.seed_rule(EligibilityRule {
            id: Uuid::new_v4(),
            rule_name: "AccountActive".to_string(),
            description: "Member must hold an active pension account".to_string(),
            benefit_type: BenefitType::Retirement,
            threshold: None,
            is_boolean: true,
            evaluation_order: 3,
            is_active: true,
            error_code: "ELIG_ACCOUNT".to_string(),
        });
        store
    }

    /// When set, staging a ledger transaction fails. Used by tests to
    /// exercise rollback paths.
    pub fn set_reject_postings(&self, reject: bool) {
        self.reject_postings.store(reject, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a member directly into committed state.
    pub fn seed_member(&self, member: Member) {
        self.lock().members.insert(member.id, member);
    }

    /// Seeds an employer directly into committed state.
    pub fn seed_employer(&self, employer: Employer) {
        self.lock().employers.insert(employer.id, employer);
    }

    /// Seeds an account directly into committed state.
    pub fn seed_account(&self, account: Account) {
        self.lock().accounts.insert(account.id, account);
    }

    /// Seeds a contribution directly into committed state.
    pub fn seed_contribution(&self, contribution: Contribution) {
        self.lock().contributions.insert(contribution.id, contribution);
    }

    /// Seeds a ledger transaction directly into committed state.
    pub fn seed_transaction(&self, transaction: LedgerTransaction) {
        self.lock().transactions.insert(transaction.id, transaction);
    }

    /// Seeds an eligibility rule directly into committed state.
    pub fn seed_rule(&self, rule: EligibilityRule) {
        self.lock().rules.push(rule);
    }

    /// Committed view of an account, for test assertions.
    #[must_use]
    pub fn account_snapshot(&self, id: Uuid) -> Option<Account> {
        self.lock().accounts.get(&id).cloned()
    }

    /// Committed view of a contribution, for test assertions.
    #[must_use]
    pub fn contribution_snapshot(&self, id: Uuid) -> Option<Contribution> {
        self.lock().contributions.get(&id).cloned()
    }

    /// Committed view of a ledger transaction, for test assertions.
    #[must_use]
    pub fn transaction_snapshot(&self, id: Uuid) -> Option<LedgerTransaction> {
        self.lock().transactions.get(&id).cloned()
    }

    /// Number of committed ledger transactions.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.lock().transactions.len()
    }
}

impl FundStore for MemoryStore {
    fn begin(&self) -> Result<Box<dyn StoreTx + '_>, StoreError> {
        let guard = self.lock();
        let snapshot = guard.clone();
        Ok(Box::new(MemTx {
            guard,
            snapshot,
            committed: false,
            reject_postings: self.reject_postings.load(Ordering::SeqCst),
        }))
    }

    fn unvalidated_contributions_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Contribution>, StoreError> {
        let mut rows: Vec<_> = self
            .lock()
            .contributions
            .values()
            .filter(|c| !c.is_validated && c.created_at >= cutoff)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.created_at);
        Ok(rows)
    }

    fn members_approaching_eligibility(
        &self,
        born_before: NaiveDate,
    ) -> Result<Vec<Member>, StoreError> {
        let mut rows: Vec<_> = self
            .lock()
            .members
            .values()
            .filter(|m| {
                m.status == MemberStatus::Active
                    && !m.is_eligible_for_benefits
                    && m.date_of_birth <= born_before
            })
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.date_of_birth);
        Ok(rows)
    }

    fn interest_eligible_accounts(
        &self,
        minimum_balance: Decimal,
    ) -> Result<Vec<Account>, StoreError> {
        let mut rows: Vec<_> = self
            .lock()
            .accounts
            .values()
            .filter(|a| a.is_postable() && a.current_balance >= minimum_balance)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        Ok(rows)
    }

    fn failed_transactions(
        &self,
        max_attempts: u32,
    ) -> Result<Vec<LedgerTransaction>, StoreError> {
        let mut rows: Vec<_> = self
            .lock()
            .transactions
            .values()
            .filter(|t| {
                t.status == TransactionStatus::Failed
                    && !t.is_reversed
                    && t.attempts < max_attempts
            })
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.transaction_date);
        Ok(rows)
    }
}

struct MemTx<'a> {
    guard: MutexGuard<'a, State>,
    snapshot: State,
    committed: bool,
    reject_postings: bool,
}

impl Drop for MemTx<'_> {
    fn drop(&mut self) {
        if !self.committed {
            *self.guard = std::mem::take(&mut self.snapshot);
        }
    }
}

impl StoreTx for MemTx<'_> {
    fn member(&mut self, id: Uuid) -> Result<Option<Member>, StoreError> {
        Ok(self.guard.members.get(&id).cloned())
    }

    fn member_accounts(&mut self, member_id: Uuid) -> Result<Vec<Account>, StoreError> {
        let mut rows: Vec<_> = self
            .guard
            .accounts
            .values()
            .filter(|a| a.member_id == member_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        Ok(rows)
    }

    fn employer(&mut self, id: Uuid) -> Result<Option<Employer>, StoreError> {
        Ok(self.guard.employers.get(&id).cloned())
    }

    fn account(&mut self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.guard.accounts.get(&id).cloned())
    }

    fn account_by_number(&mut self, number: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .guard
            .accounts
            .values()
            .find(|a| a.account_number == number)
            .cloned())
    }

    fn update_member(&mut self, member: &Member) -> Result<(), StoreError> {
        self.guard.members.insert(member.id, member.clone());
        Ok(())
    }

    fn update_account(&mut self, account: &Account) -> Result<(), StoreError> {
        self.guard.accounts.insert(account.id, account.clone());
        Ok(())
    }

    fn insert_contribution(&mut self, contribution: &Contribution) -> Result<(), StoreError> {
        self.guard
            .contributions
            .insert(contribution.id, contribution.clone());
        Ok(())
    }

    fn contribution(&mut self, id: Uuid) -> Result<Option<Contribution>, StoreError> {
        Ok(self.guard.contributions.get(&id).cloned())
    }

    fn update_contribution(&mut self, contribution: &Contribution) -> Result<(), StoreError> {
        self.guard
            .contributions
            .insert(contribution.id, contribution.clone());
        Ok(())
    }

    fn member_contributions(
        &mut self,
        member_id: Uuid,
    ) -> Result<Vec<Contribution>, StoreError> {
        let mut rows: Vec<_> = self
            .guard
            .contributions
            .values()
            .filter(|c| c.member_id == member_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.created_at);
        Ok(rows)
    }

    fn insert_transaction(
        &mut self,
        transaction: &LedgerTransaction,
    ) -> Result<(), StoreError> {
        if self.reject_postings {
            return Err(StoreError::Backend(
                "transaction write rejected".to_string(),
            ));
        }
        self.guard
            .transactions
            .insert(transaction.id, transaction.clone());
        Ok(())
    }

    fn transaction(&mut self, id: Uuid) -> Result<Option<LedgerTransaction>, StoreError> {
        Ok(self.guard.transactions.get(&id).cloned())
    }

    fn transaction_for_contribution(
        &mut self,
        contribution_id: Uuid,
    ) -> Result<Option<LedgerTransaction>, StoreError> {
        Ok(self
            .guard
            .transactions
            .values()
            .find(|t| t.contribution_id == Some(contribution_id))
            .cloned())
    }

    fn update_transaction(
        &mut self,
        transaction: &LedgerTransaction,
    ) -> Result<(), StoreError> {
        self.guard
            .transactions
            .insert(transaction.id, transaction.clone());
        Ok(())
    }

    fn eligibility_rules(&mut self) -> Result<Vec<EligibilityRule>, StoreError> {
        Ok(self.guard.rules.clone())
    }

    fn benefit_eligibility(
        &mut self,
        member_id: Uuid,
        benefit: BenefitType,
    ) -> Result<Option<BenefitEligibility>, StoreError> {
        Ok(self
            .guard
            .eligibility
            .values()
            .find(|row| row.member_id == member_id && row.benefit_type == benefit)
            .cloned())
    }

    fn insert_benefit_eligibility(
        &mut self,
        row: &BenefitEligibility,
    ) -> Result<(), StoreError> {
        self.guard.eligibility.insert(row.id, row.clone());
        Ok(())
    }

    fn update_benefit_eligibility(
        &mut self,
        row: &BenefitEligibility,
    ) -> Result<(), StoreError> {
        self.guard.eligibility.insert(row.id, row.clone());
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> Result<(), StoreError> {
        self.committed = true;
        Ok(())
    }

    fn rollback(self: Box<Self>) {
        // Drop restores the snapshot.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use fundra_core::domain::TransactionKind;

    fn account(number: &str, balance: Decimal) -> Account {
        Account {
            id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            employer_id: None,
            account_number: number.to_string(),
            kind: fundra_core::domain::AccountKind::IndividualContribution,
            total_contributions: 0,
            current_balance: balance,
            is_restricted: false,
            is_closed: false,
            status: fundra_core::domain::AccountStatus::Active,
        }
    }

    #[test]
    fn test_commit_persists_staged_writes() {
        let store = MemoryStore::new();
        let row = account("PA-1", dec!(100));
        let id = row.id;

        let mut tx = store.begin().unwrap();
        tx.update_account(&row).unwrap();
        tx.commit().unwrap();

        assert!(store.account_snapshot(id).is_some());
    }

    #[test]
    fn test_drop_without_commit_rolls_back() {
        let store = MemoryStore::new();
        let row = account("PA-1", dec!(100));
        let id = row.id;

        {
            let mut tx = store.begin().unwrap();
            tx.update_account(&row).unwrap();
        }

        assert!(store.account_snapshot(id).is_none());
    }

    #[test]
    fn test_explicit_rollback_discards_staged_writes() {
        let store = MemoryStore::new();
        let row = account("PA-1", dec!(100));
        let id = row.id;

        let mut tx = store.begin().unwrap();
        tx.update_account(&row).unwrap();
        tx.rollback();

        assert!(store.account_snapshot(id).is_none());
    }

    #[test]
    fn test_interest_eligible_accounts_respects_minimum() {
        let store = MemoryStore::new();
        store.seed_account(account("PA-LOW", dec!(999.99)));
        store.seed_account(account("PA-HIGH", dec!(1000)));

        let rows = store.interest_eligible_accounts(dec!(1000)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].account_number, "PA-HIGH");
    }

    fn transaction(status: TransactionStatus, attempts: u32) -> LedgerTransaction {
        let now = Utc::now();
        LedgerTransaction {
            id: Uuid::new_v4(),
            debit_account: "EMP-1".to_string(),
            debit_bank: "First Bank".to_string(),
            credit_account: "PA-1".to_string(),
            credit_bank: "Pension Ledger".to_string(),
            member_id: Uuid::new_v4(),
            contribution_id: None,
            kind: TransactionKind::Contribution,
            amount: dec!(100),
            status,
            attempts,
            reference: "TXN-test".to_string(),
            transaction_date: now,
            processed_at: None,
            is_reversed: false,
        }
    }

    #[rstest]
    #[case::no_attempts_yet(TransactionStatus::Failed, 0, true)]
    #[case::one_attempt_left(TransactionStatus::Failed, 2, true)]
    #[case::exhausted(TransactionStatus::Failed, 3, false)]
    #[case::completed(TransactionStatus::Completed, 0, false)]
    #[case::pending(TransactionStatus::Pending, 0, false)]
    fn test_failed_transaction_candidacy(
        #[case] status: TransactionStatus,
        #[case] attempts: u32,
        #[case] expected: bool,
    ) {
        let store = MemoryStore::new();
        store.seed_transaction(transaction(status, attempts));

        let candidates = store.failed_transactions(3).unwrap();
        assert_eq!(!candidates.is_empty(), expected);
    }

    #[test]
    fn test_default_rules_are_seeded_in_order() {
        let store = MemoryStore::with_default_rules(&FundConfig::default());
        let mut tx = store.begin().unwrap();
        let rules = tx.eligibility_rules().unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].rule_name, "MinimumAge");
        assert_eq!(rules[0].threshold, Some(dec!(18)));
        assert!(rules.iter().all(|r| r.is_active));
    }
}
