//! Transaction ledger service.
//!
//! Owns creation and state of ledger transactions: recording postings
//! inside a caller-owned session, retrying failed transactions with a
//! bounded attempt counter, and applying interest to accounts.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::LedgerError;
use crate::config::FundConfig;
use crate::domain::{
    LedgerTransaction, PostingAccounts, TransactionKind, TransactionStatus,
};
use crate::store::{FundStore, StoreError, StoreTx};

/// Input for recording one posting.
#[derive(Debug, Clone)]
pub struct PostingInput {
    /// Resolved debit/credit pair.
    pub posting: PostingAccounts,
    /// Member the movement belongs to.
    pub member_id: Uuid,
    /// Originating contribution, for contribution postings.
    pub contribution_id: Option<Uuid>,
    /// Movement classification.
    pub kind: TransactionKind,
    /// Amount moved.
    pub amount: Decimal,
}

/// Bank label recorded for fund-internal pension accounts. Pension
/// accounts live inside the fund's own books, not at an external bank.
pub const PENSION_LEDGER_BANK: &str = "Pension Ledger";

/// Generates an opaque transaction reference number.
#[must_use]
pub fn generate_reference() -> String {
    format!("TXN-{}", Uuid::new_v4().simple())
}

/// The transaction ledger.
pub struct TransactionLedger {
    config: Arc<FundConfig>,
}

impl TransactionLedger {
    /// Creates a ledger bound to the fund configuration.
    #[must_use]
    pub fn new(config: Arc<FundConfig>) -> Self {
        Self { config }
    }

    /// Records a posting inside the caller's session.
    ///
    /// There is no live payment-gateway integration; this record is the
    /// authoritative account of a logical posting, so it is created
    /// `Completed`. A store failure is converted to
    /// [`LedgerError::ProcessingFailed`] rather than propagated; the
    /// caller must abort its own unit of work on seeing it.
    pub fn post(
        &self,
        tx: &mut dyn StoreTx,
        input: PostingInput,
    ) -> Result<LedgerTransaction, LedgerError> {
        let txn = build_completed(
            input.posting,
            input.member_id,
            input.contribution_id,
            input.kind,
            input.amount,
        );

        match tx.insert_transaction(&txn) {
            Ok(()) => {
                info!(
                    transaction_id = %txn.id,
                    reference = %txn.reference,
                    kind = ?txn.kind,
                    amount = %txn.amount,
                    "posting recorded"
                );
                Ok(txn)
            }
            Err(e) => {
                warn!(member_id = %input.member_id, error = %e, "posting failed");
                Err(LedgerError::ProcessingFailed(e.to_string()))
            }
        }
    }

    /// Retries a failed transaction.
    ///
    /// The attempt counter advances exactly once per call, on both the
    /// success and failure branches, bounding retries regardless of
    /// outcome. Contribution retries also credit the destination pension
    /// account, which the original posting never reached.
    pub fn retry_failed(
        &self,
        store: &dyn FundStore,
        transaction_id: Uuid,
    ) -> Result<LedgerTransaction, LedgerError> {
        let mut tx = store
            .begin()
            .map_err(|e| LedgerError::ProcessingFailed(e.to_string()))?;
        let mut txn = tx
            .transaction(transaction_id)
            .map_err(|e| LedgerError::ProcessingFailed(e.to_string()))?
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;

        if txn.attempts >= self.config.max_transaction_attempts {
            return Err(LedgerError::AttemptsExhausted(transaction_id));
        }

        txn.attempts += 1;
        txn.status = TransactionStatus::Completed;
        txn.processed_at = Some(Utc::now());

        let staged = match credit_destination(tx.as_mut(), &txn) {
            Ok(()) => tx.update_transaction(&txn),
            Err(e) => Err(e),
        };
        let applied = match staged {
            Ok(()) => tx.commit(),
            Err(e) => {
                tx.rollback();
                Err(e)
            }
        };

        match applied {
            Ok(()) => {
                info!(
                    transaction_id = %txn.id,
                    attempts = txn.attempts,
                    "failed transaction completed after retry"
                );
                Ok(txn)
            }
            Err(e) => {
                txn.status = TransactionStatus::Failed;
                txn.processed_at = None;
                self.record_failed_attempt(store, &txn);
                Err(LedgerError::RetryFailed {
                    transaction_id,
                    attempts: txn.attempts,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// The retry candidate set: failed transactions that have not
    /// exhausted their attempt budget.
    pub fn failed_candidates(
        &self,
        store: &dyn FundStore,
    ) -> Result<Vec<LedgerTransaction>, StoreError> {
        store.failed_transactions(self.config.max_transaction_attempts)
    }

    /// Credits interest to an account.
    ///
    /// Records an `Interest` transaction and the balance change in one
    /// session so the balance never moves without a ledger-confirmed
    /// transaction. Rolls back and reports
    /// [`LedgerError::InterestApplicationFailed`] on a store failure.
    pub fn apply_interest(
        &self,
        store: &dyn FundStore,
        account_id: Uuid,
        member_id: Uuid,
        amount: Decimal,
    ) -> Result<LedgerTransaction, LedgerError> {
        let mut tx = store
            .begin()
            .map_err(|e| LedgerError::InterestApplicationFailed(e.to_string()))?;
        let mut account = tx
            .account(account_id)
            .map_err(|e| LedgerError::InterestApplicationFailed(e.to_string()))?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let posting = PostingAccounts {
            debit_account: self.config.settlement.account_number.clone(),
            debit_bank: self.config.settlement.bank_name.clone(),
            credit_account: account.account_number.clone(),
            credit_bank: PENSION_LEDGER_BANK.to_string(),
        };
        let txn = build_completed(posting, member_id, None, TransactionKind::Interest, amount);
        account.current_balance += amount;

        let staged = match tx.insert_transaction(&txn) {
            Ok(()) => tx.update_account(&account),
            Err(e) => Err(e),
        };
        let applied = match staged {
            Ok(()) => tx.commit(),
            Err(e) => {
                tx.rollback();
                Err(e)
            }
        };

        match applied {
            Ok(()) => {
                info!(
                    account_id = %account_id,
                    amount = %amount,
                    new_balance = %account.current_balance,
                    "interest applied"
                );
                Ok(txn)
            }
            Err(e) => Err(LedgerError::InterestApplicationFailed(e.to_string())),
        }
    }

    /// Best-effort bookkeeping of a failed retry: the attempt counter
    /// and `Failed` status must survive even though the business
    /// session rolled back.
    fn record_failed_attempt(&self, store: &dyn FundStore, txn: &LedgerTransaction) {
        let recorded = store.begin().and_then(|mut tx| {
            tx.update_transaction(txn)?;
            tx.commit()
        });
        if let Err(e) = recorded {
            warn!(
                transaction_id = %txn.id,
                error = %e,
                "could not record failed retry attempt"
            );
        }
    }
}

/// Credits the destination pension account of a contribution retry.
/// Non-contribution transactions carry no balance side effect here.
fn credit_destination(
    tx: &mut dyn StoreTx,
    txn: &LedgerTransaction,
) -> Result<(), StoreError> {
    if txn.kind != TransactionKind::Contribution {
        return Ok(());
    }
    let contribution_id = txn.contribution_id.ok_or_else(|| {
        StoreError::Internal(format!(
            "contribution transaction {} has no contribution link",
            txn.id
        ))
    })?;
    let contribution = tx.contribution(contribution_id)?.ok_or_else(|| {
        StoreError::Internal(format!("contribution {contribution_id} missing"))
    })?;
    let mut account = tx
        .account_by_number(&contribution.account_number)?
        .ok_or_else(|| {
            StoreError::Internal(format!(
                "pension account {} missing",
                contribution.account_number
            ))
        })?;

    account.current_balance += txn.amount;
    tx.update_account(&account)
}

fn build_completed(
    posting: PostingAccounts,
    member_id: Uuid,
    contribution_id: Option<Uuid>,
    kind: TransactionKind,
    amount: Decimal,
) -> LedgerTransaction {
    let now = Utc::now();
    LedgerTransaction {
        id: Uuid::new_v4(),
        debit_account: posting.debit_account,
        debit_bank: posting.debit_bank,
        credit_account: posting.credit_account,
        credit_bank: posting.credit_bank,
        member_id,
        contribution_id,
        kind,
        amount,
        status: TransactionStatus::Completed,
        attempts: 0,
        reference: generate_reference(),
        transaction_date: now,
        processed_at: Some(now),
        is_reversed: false,
    }
}
