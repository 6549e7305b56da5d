//! Fund configuration.
//!
//! An explicit configuration struct handed to each component at
//! construction. Thresholds and rates are process-wide, read-only
//! settings; nothing in the core reads ambient/global state.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Process-wide fund settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FundConfig {
    /// Minimum age required by the seeded retirement eligibility rule.
    /// Also drives the rolling approaching-eligibility window
    /// (`minimum_age - 5` years).
    #[serde(default = "default_minimum_age")]
    pub minimum_eligibility_age: u32,
    /// Minimum balance an account needs to accrue interest.
    #[serde(default = "default_minimum_interest_balance")]
    pub minimum_interest_balance: Decimal,
    /// Annual interest rate, in percent.
    #[serde(default = "default_annual_interest_rate")]
    pub annual_interest_rate_percent: Decimal,
    /// Processing attempts after which a failed transaction is
    /// permanently excluded from automatic retry.
    #[serde(default = "default_max_attempts")]
    pub max_transaction_attempts: u32,
    /// Bounded attempts for a whole job run before the run is dropped.
    #[serde(default = "default_job_retry_attempts")]
    pub job_retry_attempts: u32,
    /// How far back the validation job looks for unvalidated
    /// contributions, in days.
    #[serde(default = "default_validation_lookback_days")]
    pub validation_lookback_days: i64,
    /// Time-to-live for read-through member caches, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// The fund's settlement account (credit side of contributions).
    #[serde(default)]
    pub settlement: SettlementAccount,
}

/// The fund's configured settlement bank account.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementAccount {
    /// Settlement account number.
    pub account_number: String,
    /// Bank holding the settlement account.
    pub bank_name: String,
}

impl Default for SettlementAccount {
    fn default() -> Self {
        Self {
            account_number: "FUND-SETTLEMENT-001".to_string(),
            bank_name: "Fund Custodial Bank".to_string(),
        }
    }
}

fn default_minimum_age() -> u32 {
    18
}

fn default_minimum_interest_balance() -> Decimal {
    Decimal::from(1_000)
}

fn default_annual_interest_rate() -> Decimal {
    Decimal::from(12)
}

fn default_max_attempts() -> u32 {
    3
}

fn default_job_retry_attempts() -> u32 {
    3
}

fn default_validation_lookback_days() -> i64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for FundConfig {
    fn default() -> Self {
        Self {
            minimum_eligibility_age: default_minimum_age(),
            minimum_interest_balance: default_minimum_interest_balance(),
            annual_interest_rate_percent: default_annual_interest_rate(),
            max_transaction_attempts: default_max_attempts(),
            job_retry_attempts: default_job_retry_attempts(),
            validation_lookback_days: default_validation_lookback_days(),
            cache_ttl_secs: default_cache_ttl_secs(),
            settlement: SettlementAccount::default(),
        }
    }
}
