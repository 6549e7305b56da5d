//! Eligibility engine against the in-memory store and seeded rules.

mod common;

use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{account_for, harness, member_aged, validated_monthly_contribution};
use fundra_core::domain::{AccountKind, BenefitType, EligibilityRule};
use fundra_core::eligibility::ELIGIBLE_MESSAGE;
use fundra_core::store::{FundStore, StoreTx};

fn seed_qualifying_member(h: &common::Harness) -> Uuid {
    let member = member_aged(65);
    let account = account_for(&member, AccountKind::IndividualContribution, dec!(5000));
    for _ in 0..12 {
        h.store
            .seed_contribution(validated_monthly_contribution(&member, &account));
    }
    let member_id = member.id;
    h.store.seed_member(member);
    h.store.seed_account(account);
    member_id
}

#[test]
fn test_underage_member_fails_age_rule() {
    let h = harness();
    let member = member_aged(17);
    let account = account_for(&member, AccountKind::IndividualContribution, dec!(0));
    for _ in 0..12 {
        h.store
            .seed_contribution(validated_monthly_contribution(&member, &account));
    }
    let member_id = member.id;
    h.store.seed_member(member);
    h.store.seed_account(account);

    let outcome = h.engine.recalculate(member_id).unwrap();
    assert!(!outcome.is_eligible);
    assert!(!outcome.newly_eligible);
    assert_eq!(outcome.failed_requirements.len(), 1);
    assert_eq!(outcome.failed_requirements[0].rule_name, "MinimumAge");
    assert!(outcome.reason.contains("18 years old"));
}

#[test]
fn test_qualifying_member_becomes_eligible() {
    let h = harness();
    let member_id = seed_qualifying_member(&h);

    let outcome = h.engine.recalculate(member_id).unwrap();
    assert!(outcome.is_eligible);
    assert!(outcome.newly_eligible);
    assert!(outcome.failed_requirements.is_empty());
    assert_eq!(outcome.reason, ELIGIBLE_MESSAGE);

    // The member flag was persisted.
    let mut tx = h.store.begin().unwrap();
    let member = tx.member(member_id).unwrap().unwrap();
    assert!(member.is_eligible_for_benefits);
    assert!(member.eligibility_checked_at.is_some());
    let row = tx
        .benefit_eligibility(member_id, BenefitType::Retirement)
        .unwrap()
        .unwrap();
    assert!(row.is_eligible);
}

#[test]
fn test_recalculation_is_idempotent() {
    let h = harness();
    let member_id = seed_qualifying_member(&h);

    let first = h.engine.recalculate(member_id).unwrap();
    let second = h.engine.recalculate(member_id).unwrap();

    assert!(first.newly_eligible);
    // The flag already flipped; the second run confirms without
    // reporting a transition.
    assert!(second.is_eligible);
    assert!(!second.newly_eligible);
}

#[test]
fn test_multiple_failures_join_reasons() {
    let h = harness();
    // Underage, no contributions, no account: every rule fails.
    let member = member_aged(16);
    let member_id = member.id;
    h.store.seed_member(member);

    let outcome = h.engine.recalculate(member_id).unwrap();
    assert!(!outcome.is_eligible);
    assert_eq!(outcome.failed_requirements.len(), 3);
    assert!(outcome.reason.contains("; "));
}

#[test]
fn test_unknown_active_rule_is_configuration_error() {
    let h = harness();
    let member_id = seed_qualifying_member(&h);
    h.store.seed_rule(EligibilityRule {
        id: Uuid::new_v4(),
        rule_name: "MaximumDebt".to_string(),
        description: "Unsupported rule".to_string(),
        benefit_type: BenefitType::Retirement,
        threshold: None,
        is_boolean: true,
        evaluation_order: 4,
        is_active: true,
        error_code: "ELIG_DEBT".to_string(),
    });

    let err = h.engine.recalculate(member_id).unwrap_err();
    assert_eq!(err.code(), "UNKNOWN_RULE");
}

#[test]
fn test_inactive_unknown_rule_is_skipped() {
    let h = harness();
    let member_id = seed_qualifying_member(&h);
    h.store.seed_rule(EligibilityRule {
        id: Uuid::new_v4(),
        rule_name: "MaximumDebt".to_string(),
        description: "Retired rule".to_string(),
        benefit_type: BenefitType::Retirement,
        threshold: None,
        is_boolean: true,
        evaluation_order: 4,
        is_active: false,
        error_code: "ELIG_DEBT".to_string(),
    });

    let outcome = h.engine.recalculate(member_id).unwrap();
    assert!(outcome.is_eligible);
}

#[test]
fn test_threshold_rule_without_threshold_is_misconfigured() {
    let h = harness();
    let member_id = seed_qualifying_member(&h);
    h.store.seed_rule(EligibilityRule {
        id: Uuid::new_v4(),
        rule_name: "MinimumAge".to_string(),
        description: "Broken seed".to_string(),
        benefit_type: BenefitType::Retirement,
        threshold: None,
        is_boolean: false,
        evaluation_order: 5,
        is_active: true,
        error_code: "ELIG_AGE".to_string(),
    });

    let err = h.engine.recalculate(member_id).unwrap_err();
    assert_eq!(err.code(), "RULE_MISCONFIGURED");
}

#[test]
fn test_unknown_member() {
    let h = harness();
    let err = h.engine.recalculate(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.code(), "MEMBER_NOT_FOUND");
}
