//! Member and employer records.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status shared by members and pension accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Record is live and participates in queries and jobs.
    Active,
    /// Record is dormant; excluded from eligibility candidacy.
    Passive,
    /// Record is soft-deleted.
    Deleted,
}

/// A fund member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// The member ID.
    pub id: Uuid,
    /// Full legal name.
    pub full_name: String,
    /// Date of birth, used by the minimum-age eligibility rule.
    pub date_of_birth: NaiveDate,
    /// Sponsoring employer, if the member is employer-enrolled.
    pub employer_id: Option<Uuid>,
    /// The member's own bank account number (debit side of individual
    /// contributions).
    pub bank_account_number: String,
    /// The member's bank name.
    pub bank_name: String,
    /// Outcome of the most recent eligibility recalculation.
    pub is_eligible_for_benefits: bool,
    /// When the eligibility flag last changed.
    pub eligibility_checked_at: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: MemberStatus,
}

impl Member {
    /// Age in whole years as of `today`, decremented by one when the
    /// birthday has not yet occurred this year.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.date_of_birth.year();
        let birthday_passed = (today.month(), today.day())
            >= (self.date_of_birth.month(), self.date_of_birth.day());
        if !birthday_passed {
            age -= 1;
        }
        age
    }
}

/// A sponsoring employer, resolved for the debit side of
/// employer-sponsored contributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employer {
    /// The employer ID.
    pub id: Uuid,
    /// Registered company name.
    pub name: String,
    /// Employer bank account number.
    pub bank_account_number: String,
    /// Employer bank name.
    pub bank_name: String,
}
