//! Eligibility recalculation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::error::EligibilityError;
use super::rules::{RuleContext, RuleKind};
use crate::domain::{BenefitEligibility, BenefitType};
use crate::store::{FundStore, MemberCache, benefits_key, eligibility_key};

/// Reason recorded when every active rule passes.
pub const ELIGIBLE_MESSAGE: &str = "All eligibility requirements satisfied";

/// One rule the member did not satisfy.
#[derive(Debug, Clone)]
pub struct FailedRequirement {
    /// The rule's dispatch name.
    pub rule_name: String,
    /// Human-readable requirement description.
    pub description: String,
    /// The rule's stable failure code.
    pub error_code: String,
}

/// Result of one recalculation.
#[derive(Debug, Clone)]
pub struct EligibilityOutcome {
    /// The member evaluated.
    pub member_id: Uuid,
    /// The benefit evaluated.
    pub benefit_type: BenefitType,
    /// Whether every active rule passed.
    pub is_eligible: bool,
    /// True when this recalculation flipped the member from ineligible
    /// to eligible.
    pub newly_eligible: bool,
    /// Rules that did not pass, in evaluation order.
    pub failed_requirements: Vec<FailedRequirement>,
    /// Persisted reason text.
    pub reason: String,
    /// When the evaluation ran.
    pub evaluated_at: DateTime<Utc>,
}

/// The eligibility rule engine.
pub struct EligibilityEngine {
    store: Arc<dyn FundStore>,
    cache: Arc<dyn MemberCache>,
}

impl EligibilityEngine {
    /// Creates the engine over its collaborators.
    #[must_use]
    pub fn new(store: Arc<dyn FundStore>, cache: Arc<dyn MemberCache>) -> Self {
        Self { store, cache }
    }

    /// Recalculates a member's retirement benefit eligibility.
    ///
    /// Evaluates every active rule in ascending evaluation order against
    /// the member's own accounts and contributions, updates the member's
    /// eligibility flag when it changed, and upserts the single
    /// `BenefitEligibility` row for (member, Retirement). Idempotent:
    /// re-running with unchanged state writes the same outcome to the
    /// same row. Store failures roll the session back; caches are
    /// invalidated only after a commit.
    pub fn recalculate(&self, member_id: Uuid) -> Result<EligibilityOutcome, EligibilityError> {
        let mut tx = self.store.begin()?;
        let mut member = tx
            .member(member_id)?
            .ok_or(EligibilityError::MemberNotFound(member_id))?;
        let accounts = tx.member_accounts(member_id)?;
        let contributions = tx.member_contributions(member_id)?;
        let mut rules = tx.eligibility_rules()?;
        rules.sort_by_key(|rule| rule.evaluation_order);

        let now = Utc::now();
        let ctx = RuleContext {
            member: &member,
            accounts: &accounts,
            contributions: &contributions,
            today: now.date_naive(),
        };

        let mut failed_requirements = Vec::new();
        for rule in rules.iter().filter(|rule| rule.is_active) {
            let kind = RuleKind::from_name(&rule.rule_name)
                .ok_or_else(|| EligibilityError::UnknownRule(rule.rule_name.clone()))?;
            if !kind.evaluate(rule, &ctx)? {
                failed_requirements.push(FailedRequirement {
                    rule_name: rule.rule_name.clone(),
                    description: rule.description.clone(),
                    error_code: rule.error_code.clone(),
                });
            }
        }

        let is_eligible = failed_requirements.is_empty();
        let reason = if is_eligible {
            ELIGIBLE_MESSAGE.to_string()
        } else {
            failed_requirements
                .iter()
                .map(|requirement| requirement.description.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        let newly_eligible = is_eligible && !member.is_eligible_for_benefits;
        if member.is_eligible_for_benefits != is_eligible {
            member.is_eligible_for_benefits = is_eligible;
            member.eligibility_checked_at = Some(now);
            tx.update_member(&member)?;
        }

        match tx.benefit_eligibility(member_id, BenefitType::Retirement)? {
            Some(mut row) => {
                row.is_eligible = is_eligible;
                row.evaluated_at = now;
                row.reason = reason.clone();
                tx.update_benefit_eligibility(&row)?;
            }
            None => {
                let row = BenefitEligibility {
                    id: Uuid::new_v4(),
                    member_id,
                    benefit_type: BenefitType::Retirement,
                    is_eligible,
                    evaluated_at: now,
                    reason: reason.clone(),
                };
                tx.insert_benefit_eligibility(&row)?;
            }
        }
        tx.commit()?;

        self.cache.remove(&eligibility_key(member_id));
        self.cache.remove(&benefits_key(member_id));
        info!(
            member_id = %member_id,
            is_eligible,
            failed = failed_requirements.len(),
            "eligibility recalculated"
        );

        Ok(EligibilityOutcome {
            member_id,
            benefit_type: BenefitType::Retirement,
            is_eligible,
            newly_eligible,
            failed_requirements,
            reason,
            evaluated_at: now,
        })
    }
}
