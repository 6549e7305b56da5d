//! Eligibility rule reference data and persisted outcomes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Benefit a member may be eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitType {
    /// Standard retirement benefit.
    Retirement,
}

/// A named, ordered, configurable predicate used to decide benefit
/// eligibility. Read-only reference data, seeded once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRule {
    /// The rule ID.
    pub id: Uuid,
    /// Identifier used for evaluator dispatch (e.g. `MinimumAge`).
    pub rule_name: String,
    /// Human-readable requirement description, surfaced in failure
    /// reasons.
    pub description: String,
    /// Benefit the rule gates.
    pub benefit_type: BenefitType,
    /// Numeric threshold for threshold-style rules.
    pub threshold: Option<Decimal>,
    /// Whether the rule is a plain boolean predicate (no threshold).
    pub is_boolean: bool,
    /// Ascending evaluation position.
    pub evaluation_order: i32,
    /// Inactive rules are skipped.
    pub is_active: bool,
    /// Stable code reported when the rule fails.
    pub error_code: String,
}

/// The persisted, per-member outcome of the most recent eligibility
/// recalculation. One row per (member, benefit) pair; upserted, never
/// duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitEligibility {
    /// The record ID.
    pub id: Uuid,
    /// Member evaluated.
    pub member_id: Uuid,
    /// Benefit evaluated.
    pub benefit_type: BenefitType,
    /// Whether all active rules passed.
    pub is_eligible: bool,
    /// When the evaluation ran.
    pub evaluated_at: DateTime<Utc>,
    /// Concatenated failed-rule descriptions, or the success message.
    pub reason: String,
}
