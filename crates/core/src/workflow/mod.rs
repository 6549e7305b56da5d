//! Contribution/withdrawal workflow.
//!
//! Orchestrates the balance-affecting member operations and the support
//! queries the recurring jobs consume.
//!
//! # Modules
//!
//! - `types` - Request/receipt types and validation outcomes
//! - `error` - Workflow error taxonomy
//! - `locks` - Per-member serialization of balance mutation
//! - `service` - The workflow itself

pub mod error;
pub mod locks;
pub mod service;
pub mod types;

pub use error::WorkflowError;
pub use locks::AccountLocks;
pub use service::ContributionWorkflow;
pub use types::{
    AddContributionRequest, ContributionReceipt, ValidationOutcome, ValidationRejection,
    WithdrawalRequest, WithdrawalReceipt,
};
