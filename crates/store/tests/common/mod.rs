//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use fundra_core::config::FundConfig;
use fundra_core::domain::{
    Account, AccountKind, AccountStatus, Contribution, ContributionKind, LedgerTransaction,
    Member, MemberStatus, TransactionKind, TransactionStatus,
};
use fundra_core::eligibility::EligibilityEngine;
use fundra_core::ledger::TransactionLedger;
use fundra_core::store::{FundStore, MemberCache};
use fundra_core::workflow::ContributionWorkflow;
use fundra_store::{MemoryStore, MokaMemberCache};

/// Everything the integration tests wire together.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub workflow: Arc<ContributionWorkflow>,
    pub ledger: Arc<TransactionLedger>,
    pub engine: Arc<EligibilityEngine>,
    pub config: Arc<FundConfig>,
}

/// Builds the full service graph over a rule-seeded in-memory store.
pub fn harness() -> Harness {
    let config = Arc::new(FundConfig::default());
    let store = Arc::new(MemoryStore::with_default_rules(&config));
    let dyn_store: Arc<dyn FundStore> = store.clone();
    let cache: Arc<dyn MemberCache> =
        Arc::new(MokaMemberCache::new(1_000, config.cache_ttl_secs));
    let ledger = Arc::new(TransactionLedger::new(Arc::clone(&config)));
    let workflow = Arc::new(ContributionWorkflow::new(
        Arc::clone(&dyn_store),
        Arc::clone(&ledger),
        Arc::clone(&cache),
        Arc::clone(&config),
    ));
    let engine = Arc::new(EligibilityEngine::new(dyn_store, cache));
    Harness {
        store,
        workflow,
        ledger,
        engine,
        config,
    }
}

/// An active member of the given age with no employer.
pub fn member_aged(age: i32) -> Member {
    let today = Utc::now().date_naive();
    let birth = today
        .with_year(today.year() - age)
        .or_else(|| NaiveDate::from_ymd_opt(today.year() - age, 3, 1))
        .expect("birth date should exist");
    Member {
        id: Uuid::new_v4(),
        full_name: "Test Member".to_string(),
        date_of_birth: birth,
        employer_id: None,
        bank_account_number: format!("MEM-{}", Uuid::new_v4().simple()),
        bank_name: "Member Bank".to_string(),
        is_eligible_for_benefits: false,
        eligibility_checked_at: None,
        status: MemberStatus::Active,
    }
}

/// A postable account of the given kind for the member.
pub fn account_for(member: &Member, kind: AccountKind, balance: Decimal) -> Account {
    Account {
        id: Uuid::new_v4(),
        member_id: member.id,
        employer_id: member.employer_id,
        account_number: format!("PA-{}", Uuid::new_v4().simple()),
        kind,
        total_contributions: 0,
        current_balance: balance,
        is_restricted: false,
        is_closed: false,
        status: AccountStatus::Active,
    }
}

/// A validated monthly contribution against the account.
pub fn validated_monthly_contribution(member: &Member, account: &Account) -> Contribution {
    Contribution {
        id: Uuid::new_v4(),
        member_id: member.id,
        amount: Decimal::from(100),
        account_number: account.account_number.clone(),
        kind: ContributionKind::Monthly,
        is_validated: true,
        created_at: Utc::now(),
    }
}

/// An unvalidated contribution with no ledger transaction behind it.
pub fn orphan_contribution(member: &Member, account: &Account) -> Contribution {
    Contribution {
        id: Uuid::new_v4(),
        member_id: member.id,
        amount: Decimal::from(100),
        account_number: account.account_number.clone(),
        kind: ContributionKind::Monthly,
        is_validated: false,
        created_at: Utc::now(),
    }
}

/// A failed contribution transaction with the given attempt count.
pub fn failed_contribution_transaction(
    member: &Member,
    contribution_id: Option<Uuid>,
    amount: Decimal,
    attempts: u32,
) -> LedgerTransaction {
    LedgerTransaction {
        id: Uuid::new_v4(),
        debit_account: member.bank_account_number.clone(),
        debit_bank: member.bank_name.clone(),
        credit_account: "FUND-SETTLEMENT-001".to_string(),
        credit_bank: "Fund Custodial Bank".to_string(),
        member_id: member.id,
        contribution_id,
        kind: TransactionKind::Contribution,
        amount,
        status: TransactionStatus::Failed,
        attempts,
        reference: format!("TXN-{}", Uuid::new_v4().simple()),
        transaction_date: Utc::now(),
        processed_at: None,
        is_reversed: false,
    }
}
