//! Posting account resolution.
//!
//! Maps (account kind, member) to the debit/credit bank-account pair a
//! ledger transaction is recorded against. Pure lookup: the employer
//! record comes in through an injected lookup and nothing is mutated.

use thiserror::Error;
use uuid::Uuid;

use crate::config::SettlementAccount;
use crate::domain::{AccountKind, Employer, Member, PostingAccounts};
use crate::store::StoreError;

/// Errors that can occur while resolving posting accounts.
#[derive(Debug, Error)]
pub enum PostingError {
    /// Employer-sponsored account but the member has no employer on file.
    #[error("Member {0} has no employer on file for an employer-sponsored posting")]
    MissingEmployer(Uuid),

    /// The member's employer record does not exist.
    #[error("Employer not found: {0}")]
    EmployerNotFound(Uuid),

    /// The employer lookup failed in the backing store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PostingError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingEmployer(_) => "MISSING_EMPLOYER",
            Self::EmployerNotFound(_) => "EMPLOYER_NOT_FOUND",
            Self::Store(_) => "SYSTEM_ERROR",
        }
    }
}

/// Resolves the (debit, credit) pair for a contribution posting.
///
/// Employer-sponsored pensions debit the employer's bank account;
/// individual contributions debit the member's own. Both credit the
/// fund's configured settlement account. Withdrawals reuse this
/// resolution with [`PostingAccounts::swapped`].
///
/// # Errors
///
/// Returns `MissingEmployer` when an employer-sponsored posting is
/// requested for a member without an employer id, and
/// `EmployerNotFound` when the employer record is absent.
pub fn resolve_posting_accounts<E>(
    kind: AccountKind,
    member: &Member,
    settlement: &SettlementAccount,
    employer_lookup: E,
) -> Result<PostingAccounts, PostingError>
where
    E: FnOnce(Uuid) -> Result<Option<Employer>, StoreError>,
{
    let (debit_account, debit_bank) = match kind {
        AccountKind::EmployerSponsoredPension => {
            let employer_id = member
                .employer_id
                .ok_or(PostingError::MissingEmployer(member.id))?;
            let employer = employer_lookup(employer_id)?
                .ok_or(PostingError::EmployerNotFound(employer_id))?;
            (employer.bank_account_number, employer.name)
        }
        AccountKind::IndividualContribution => {
            (member.bank_account_number.clone(), member.bank_name.clone())
        }
    };

    Ok(PostingAccounts {
        debit_account,
        debit_bank,
        credit_account: settlement.account_number.clone(),
        credit_bank: settlement.bank_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberStatus;
    use chrono::NaiveDate;

    fn member(employer_id: Option<Uuid>) -> Member {
        Member {
            id: Uuid::new_v4(),
            full_name: "Test Member".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 4).unwrap(),
            employer_id,
            bank_account_number: "MEM-123".to_string(),
            bank_name: "Member Bank".to_string(),
            is_eligible_for_benefits: false,
            eligibility_checked_at: None,
            status: MemberStatus::Active,
        }
    }

    fn settlement() -> SettlementAccount {
        SettlementAccount::default()
    }

    fn employer(id: Uuid) -> Employer {
        Employer {
            id,
            name: "Acme Corp".to_string(),
            bank_account_number: "EMP-987".to_string(),
            bank_name: "Employer Bank".to_string(),
        }
    }

    #[test]
    fn test_individual_debits_member_account() {
        let m = member(None);
        let posting = resolve_posting_accounts(
            AccountKind::IndividualContribution,
            &m,
            &settlement(),
            |_| Ok(None),
        )
        .unwrap();

        assert_eq!(posting.debit_account, "MEM-123");
        assert_eq!(posting.debit_bank, "Member Bank");
        assert_eq!(posting.credit_account, settlement().account_number);
    }

    #[test]
    fn test_employer_sponsored_debits_employer_account() {
        let employer_id = Uuid::new_v4();
        let m = member(Some(employer_id));
        let posting = resolve_posting_accounts(
            AccountKind::EmployerSponsoredPension,
            &m,
            &settlement(),
            |id| Ok(Some(employer(id))),
        )
        .unwrap();

        assert_eq!(posting.debit_account, "EMP-987");
        assert_eq!(posting.debit_bank, "Acme Corp");
        assert_eq!(posting.credit_account, settlement().account_number);
    }

    #[test]
    fn test_missing_employer_id() {
        let m = member(None);
        let result = resolve_posting_accounts(
            AccountKind::EmployerSponsoredPension,
            &m,
            &settlement(),
            |_| Ok(None),
        );
        assert!(matches!(result, Err(PostingError::MissingEmployer(_))));
    }

    #[test]
    fn test_employer_record_absent() {
        let m = member(Some(Uuid::new_v4()));
        let result = resolve_posting_accounts(
            AccountKind::EmployerSponsoredPension,
            &m,
            &settlement(),
            |_| Ok(None),
        );
        assert!(matches!(result, Err(PostingError::EmployerNotFound(_))));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PostingError::MissingEmployer(Uuid::nil()).code(),
            "MISSING_EMPLOYER"
        );
        assert_eq!(
            PostingError::EmployerNotFound(Uuid::nil()).code(),
            "EMPLOYER_NOT_FOUND"
        );
    }
}
