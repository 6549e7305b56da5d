//! Typed rule registry and evaluators.
//!
//! Seeded rules carry a string `rule_name`; evaluation resolves that
//! name to a [`RuleKind`] first. A name with no registered kind is a
//! configuration error, never an automatic pass.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::EligibilityError;
use crate::domain::{Account, Contribution, ContributionKind, EligibilityRule, Member};

/// The registered rule evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Member age must meet the rule threshold.
    MinimumAge,
    /// Count of validated monthly contributions must meet the threshold.
    MinimumContributions,
    /// At least one account must be active, unrestricted and open.
    AccountActive,
}

impl RuleKind {
    /// Resolves a seeded rule name to its registered kind.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MinimumAge" => Some(Self::MinimumAge),
            "MinimumContributions" => Some(Self::MinimumContributions),
            "AccountActive" => Some(Self::AccountActive),
            _ => None,
        }
    }

    /// The canonical rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MinimumAge => "MinimumAge",
            Self::MinimumContributions => "MinimumContributions",
            Self::AccountActive => "AccountActive",
        }
    }

    /// Evaluates the rule against the member's state.
    pub fn evaluate(
        &self,
        rule: &EligibilityRule,
        ctx: &RuleContext<'_>,
    ) -> Result<bool, EligibilityError> {
        match self {
            Self::MinimumAge => {
                let threshold = required_threshold(rule)?;
                Ok(Decimal::from(ctx.member.age_on(ctx.today)) >= threshold)
            }
            Self::MinimumContributions => {
                let threshold = required_threshold(rule)?;
                let monthly_validated = ctx
                    .contributions
                    .iter()
                    .filter(|c| c.kind == ContributionKind::Monthly && c.is_validated)
                    .count();
                Ok(Decimal::from(monthly_validated) >= threshold)
            }
            Self::AccountActive => Ok(ctx.accounts.iter().any(Account::is_postable)),
        }
    }
}

/// Member state a rule evaluates against. Contributions are scoped to
/// the member under evaluation.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The member under evaluation.
    pub member: &'a Member,
    /// The member's pension accounts.
    pub accounts: &'a [Account],
    /// The member's contributions.
    pub contributions: &'a [Contribution],
    /// Evaluation date.
    pub today: NaiveDate,
}

fn required_threshold(rule: &EligibilityRule) -> Result<Decimal, EligibilityError> {
    rule.threshold
        .ok_or_else(|| EligibilityError::MissingThreshold(rule.rule_name.clone()))
}
