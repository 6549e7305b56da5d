//! Eligibility engine error types.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Errors that can occur during eligibility recalculation.
#[derive(Debug, Error)]
pub enum EligibilityError {
    /// Member not found.
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    /// An active rule names an evaluator that is not registered.
    ///
    /// Treated as a configuration error, never as an automatic pass.
    #[error("No evaluator registered for rule '{0}'")]
    UnknownRule(String),

    /// A threshold-style rule was seeded without a threshold value.
    #[error("Rule '{0}' requires a threshold value")]
    MissingThreshold(String),

    /// Unexpected store failure; the recalculation was rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EligibilityError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::UnknownRule(_) => "UNKNOWN_RULE",
            Self::MissingThreshold(_) => "RULE_MISCONFIGURED",
            Self::Store(_) => "SYSTEM_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EligibilityError::MemberNotFound(Uuid::nil()).code(),
            "MEMBER_NOT_FOUND"
        );
        assert_eq!(
            EligibilityError::UnknownRule("MaximumDebt".to_string()).code(),
            "UNKNOWN_RULE"
        );
        assert_eq!(
            EligibilityError::MissingThreshold("MinimumAge".to_string()).code(),
            "RULE_MISCONFIGURED"
        );
        assert_eq!(
            EligibilityError::Store(StoreError::Backend("down".to_string())).code(),
            "SYSTEM_ERROR"
        );
    }
}
