//! Domain entities for the pension fund ledger.
//!
//! These types are shared across the posting resolver, transaction ledger,
//! contribution workflow and eligibility engine. They carry no persistence
//! concerns; the store contracts in [`crate::store`] move them in and out of
//! whatever backing store is wired in.

mod account;
mod contribution;
mod eligibility;
mod member;
mod transaction;

pub use account::{Account, AccountKind, AccountStatus};
pub use contribution::{Contribution, ContributionKind};
pub use eligibility::{BenefitEligibility, BenefitType, EligibilityRule};
pub use member::{Employer, Member, MemberStatus};
pub use transaction::{LedgerTransaction, PostingAccounts, TransactionKind, TransactionStatus};
