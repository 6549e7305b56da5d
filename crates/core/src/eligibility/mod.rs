//! Eligibility rule engine.
//!
//! Evaluates the ordered, seeded rule set against a member's state and
//! persists the outcome. Rule dispatch is a typed registry: every
//! active rule name must resolve to a registered evaluator.

pub mod engine;
pub mod error;
pub mod rules;

pub use engine::{ELIGIBLE_MESSAGE, EligibilityEngine, EligibilityOutcome, FailedRequirement};
pub use error::EligibilityError;
pub use rules::{RuleContext, RuleKind};
