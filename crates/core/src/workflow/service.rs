//! Contribution and withdrawal workflows.
//!
//! Orchestrates balance-affecting member operations: resolve posting
//! accounts, ask the ledger to record the movement, then mutate the
//! account inside one store session. Any failure before commit discards
//! every staged write (sessions roll back on drop).

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::error::WorkflowError;
use super::locks::AccountLocks;
use super::types::{
    AddContributionRequest, ContributionReceipt, ValidationOutcome, ValidationRejection,
    WithdrawalRequest, WithdrawalReceipt,
};
use crate::config::FundConfig;
use crate::domain::{
    Account, AccountKind, Contribution, Member, TransactionKind, TransactionStatus,
};
use crate::ledger::{PostingInput, TransactionLedger, monthly_rate_percent};
use crate::posting::resolve_posting_accounts;
use crate::store::{
    FundStore, MemberCache, StoreTx, benefits_key, eligibility_key, member_key,
};

/// Years before the configured minimum age at which members enter the
/// approaching-eligibility window.
const APPROACH_WINDOW_YEARS: u32 = 5;

/// The contribution/withdrawal workflow service.
pub struct ContributionWorkflow {
    store: Arc<dyn FundStore>,
    ledger: Arc<TransactionLedger>,
    cache: Arc<dyn MemberCache>,
    config: Arc<FundConfig>,
    locks: AccountLocks,
}

impl ContributionWorkflow {
    /// Creates the workflow over its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn FundStore>,
        ledger: Arc<TransactionLedger>,
        cache: Arc<dyn MemberCache>,
        config: Arc<FundConfig>,
    ) -> Self {
        Self {
            store,
            ledger,
            cache,
            config,
            locks: AccountLocks::new(),
        }
    }

    /// Posts a contribution to the member's matching pension account.
    ///
    /// Creates an unvalidated contribution row, records the ledger
    /// transaction, then credits the account balance and contribution
    /// count, all in one session. A ledger failure rolls the whole
    /// unit of work back and surfaces the ledger's own error.
    pub fn add_contribution(
        &self,
        request: &AddContributionRequest,
    ) -> Result<ContributionReceipt, WorkflowError> {
        validate_request(request.member_id, request.amount)?;
        self.locks
            .with_lock(request.member_id, || self.add_contribution_locked(request))
    }

    fn add_contribution_locked(
        &self,
        request: &AddContributionRequest,
    ) -> Result<ContributionReceipt, WorkflowError> {
        let mut tx = self.store.begin()?;
        let member = tx
            .member(request.member_id)?
            .ok_or(WorkflowError::MemberNotFound(request.member_id))?;
        let mut account = select_account(tx.as_mut(), &member, request.account_kind)?;

        let contribution = Contribution {
            id: Uuid::new_v4(),
            member_id: member.id,
            amount: request.amount,
            account_number: account.account_number.clone(),
            kind: request.contribution_kind,
            is_validated: false,
            created_at: Utc::now(),
        };
        tx.insert_contribution(&contribution)?;

        let posting = resolve_posting_accounts(
            request.account_kind,
            &member,
            &self.config.settlement,
            |employer_id| tx.employer(employer_id),
        )?;
        let txn = match self.ledger.post(
            tx.as_mut(),
            PostingInput {
                posting,
                member_id: member.id,
                contribution_id: Some(contribution.id),
                kind: TransactionKind::Contribution,
                amount: request.amount,
            },
        ) {
            Ok(txn) => txn,
            Err(e) => {
                // The contribution row must not survive a failed post.
                tx.rollback();
                return Err(WorkflowError::Ledger(e));
            }
        };

        account.current_balance += request.amount;
        account.total_contributions += 1;
        tx.update_account(&account)?;
        tx.commit()?;

        self.invalidate_member(member.id);
        info!(
            member_id = %member.id,
            contribution_id = %contribution.id,
            amount = %request.amount,
            new_balance = %account.current_balance,
            "contribution posted"
        );

        Ok(ContributionReceipt {
            contribution_id: contribution.id,
            transaction_id: txn.id,
            reference: txn.reference,
            account_number: account.account_number,
            amount: request.amount,
            new_balance: account.current_balance,
            created_at: contribution.created_at,
        })
    }

    /// Withdraws from the member's matching pension account.
    ///
    /// Requires benefit eligibility and sufficient funds; the
    /// insufficient-funds path performs no mutation at all. The posting
    /// pair is swapped relative to a contribution: money flows out of
    /// the fund.
    pub fn process_withdrawal(
        &self,
        request: &WithdrawalRequest,
    ) -> Result<WithdrawalReceipt, WorkflowError> {
        validate_request(request.member_id, request.amount)?;
        self.locks
            .with_lock(request.member_id, || self.process_withdrawal_locked(request))
    }

    fn process_withdrawal_locked(
        &self,
        request: &WithdrawalRequest,
    ) -> Result<WithdrawalReceipt, WorkflowError> {
        let mut tx = self.store.begin()?;
        let member = tx
            .member(request.member_id)?
            .ok_or(WorkflowError::MemberNotFound(request.member_id))?;
        if !member.is_eligible_for_benefits {
            return Err(WorkflowError::NotEligible(member.id));
        }
        let mut account = select_account(tx.as_mut(), &member, request.account_kind)?;
        if account.current_balance < request.amount {
            return Err(WorkflowError::InsufficientFunds {
                requested: request.amount,
                available: account.current_balance,
            });
        }

        let posting = resolve_posting_accounts(
            request.account_kind,
            &member,
            &self.config.settlement,
            |employer_id| tx.employer(employer_id),
        )?
        .swapped();
        let txn = match self.ledger.post(
            tx.as_mut(),
            PostingInput {
                posting,
                member_id: member.id,
                contribution_id: None,
                kind: TransactionKind::Withdrawal,
                amount: request.amount,
            },
        ) {
            Ok(txn) => txn,
            Err(e) => {
                tx.rollback();
                return Err(WorkflowError::Ledger(e));
            }
        };

        account.current_balance -= request.amount;
        tx.update_account(&account)?;
        tx.commit()?;

        self.invalidate_member(member.id);
        info!(
            member_id = %member.id,
            transaction_id = %txn.id,
            amount = %request.amount,
            new_balance = %account.current_balance,
            "withdrawal processed"
        );

        Ok(WithdrawalReceipt {
            transaction_id: txn.id,
            reference: txn.reference,
            new_balance: account.current_balance,
            processed_at: txn.processed_at.unwrap_or_else(Utc::now),
        })
    }

    /// Reconciles one contribution against the transaction ledger.
    ///
    /// Marks the contribution validated only when a `Completed`
    /// transaction references it; otherwise reports a rejection outcome
    /// so the validation job can alert and move on. Decoupled from the
    /// original post so it can run asynchronously and in bulk.
    pub fn validate_contribution(
        &self,
        contribution_id: Uuid,
    ) -> Result<ValidationOutcome, WorkflowError> {
        let mut tx = self.store.begin()?;
        let mut contribution = tx
            .contribution(contribution_id)?
            .ok_or(WorkflowError::ContributionNotFound(contribution_id))?;
        if contribution.is_validated {
            return Ok(ValidationOutcome::Validated);
        }

        match tx.transaction_for_contribution(contribution_id)? {
            None => Ok(ValidationOutcome::Rejected(
                ValidationRejection::MissingTransaction,
            )),
            Some(txn) if txn.status != TransactionStatus::Completed => Ok(
                ValidationOutcome::Rejected(ValidationRejection::TransactionNotCompleted),
            ),
            Some(_) => {
                contribution.is_validated = true;
                tx.update_contribution(&contribution)?;
                tx.commit()?;
                info!(contribution_id = %contribution_id, "contribution validated");
                Ok(ValidationOutcome::Validated)
            }
        }
    }

    // ========== Orchestrator support queries ==========

    /// Unvalidated contributions inside the configured lookback window.
    pub fn unvalidated_contributions(&self) -> Result<Vec<Contribution>, WorkflowError> {
        let cutoff = Utc::now() - Duration::days(self.config.validation_lookback_days);
        Ok(self.store.unvalidated_contributions_since(cutoff)?)
    }

    /// Active, not-yet-eligible members inside the rolling
    /// `minimum_age - 5` year window.
    pub fn eligibility_candidates(&self) -> Result<Vec<Member>, WorkflowError> {
        let cutoff = approaching_window_cutoff(
            Utc::now().date_naive(),
            self.config.minimum_eligibility_age,
        );
        Ok(self.store.members_approaching_eligibility(cutoff)?)
    }

    /// Active accounts whose balance qualifies for interest accrual.
    pub fn interest_eligible_accounts(&self) -> Result<Vec<Account>, WorkflowError> {
        Ok(self
            .store
            .interest_eligible_accounts(self.config.minimum_interest_balance)?)
    }

    /// Current monthly interest rate in percent (annual ÷ 12).
    #[must_use]
    pub fn monthly_interest_rate(&self) -> Decimal {
        monthly_rate_percent(self.config.annual_interest_rate_percent)
    }

    /// Drops every member-scoped cache entry after a balance-affecting
    /// mutation: the balance, contribution count and account state all
    /// feed eligibility.
    fn invalidate_member(&self, member_id: Uuid) {
        self.cache.remove(&member_key(member_id));
        self.cache.remove(&eligibility_key(member_id));
        self.cache.remove(&benefits_key(member_id));
    }
}

fn validate_request(member_id: Uuid, amount: Decimal) -> Result<(), WorkflowError> {
    if member_id.is_nil() {
        return Err(WorkflowError::Validation("member id is required".to_string()));
    }
    if amount <= Decimal::ZERO {
        return Err(WorkflowError::Validation(
            "amount must be positive".to_string(),
        ));
    }
    Ok(())
}

fn select_account(
    tx: &mut dyn StoreTx,
    member: &Member,
    kind: AccountKind,
) -> Result<Account, WorkflowError> {
    let account = tx
        .member_accounts(member.id)?
        .into_iter()
        .find(|account| account.kind == kind)
        .ok_or(WorkflowError::PensionAccountNotFound {
            member_id: member.id,
            kind,
        })?;
    if !account.is_postable() {
        return Err(WorkflowError::AccountNotPostable(account.account_number));
    }
    Ok(account)
}

/// Birth-date cutoff for the approaching-eligibility window: members
/// born on or before this date are within `APPROACH_WINDOW_YEARS` of the
/// minimum age.
fn approaching_window_cutoff(today: NaiveDate, minimum_age: u32) -> NaiveDate {
    let years = i32::try_from(minimum_age.saturating_sub(APPROACH_WINDOW_YEARS)).unwrap_or(0);
    let target_year = today.year() - years;
    today
        .with_year(target_year)
        // Feb 29 in a non-leap target year
        .or_else(|| NaiveDate::from_ymd_opt(target_year, 3, 1))
        .unwrap_or(today)
}
