//! Core business logic for Fundra.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence, caching and notification delivery are traits implemented elsewhere.
//!
//! # Modules
//!
//! - `domain` - Members, accounts, contributions, ledger transactions
//! - `config` - Fund-level operational parameters
//! - `store` - Persistence, cache and notification seams
//! - `posting` - Debit/credit account resolution
//! - `ledger` - Transaction recording, retry and interest accrual
//! - `workflow` - Contribution, withdrawal and validation workflows
//! - `eligibility` - Benefit eligibility rule engine
//! - `jobs` - Recurring job schedules, bodies and runner

pub mod config;
pub mod domain;
pub mod eligibility;
pub mod jobs;
pub mod ledger;
pub mod posting;
pub mod store;
pub mod workflow;
