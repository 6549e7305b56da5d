//! Transaction ledger.
//!
//! Creates, retries, and applies interest through ledger transactions.
//! The ledger owns transaction creation and state; account balances move
//! only alongside a ledger-confirmed transaction.

pub mod error;
pub mod interest;
pub mod service;

#[cfg(test)]
mod interest_props;

pub use error::LedgerError;
pub use interest::{monthly_interest, monthly_rate_fraction, monthly_rate_percent};
pub use service::{PENSION_LEDGER_BANK, PostingInput, TransactionLedger, generate_reference};
