//! Property-based tests for interest math.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::interest::{monthly_interest, monthly_rate_percent};

/// Strategy to generate balances (0.00 to 10,000,000.00).
fn balance() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate annual rates in percent (0.01 to 50.00).
fn annual_rate() -> impl Strategy<Value = Decimal> {
    (1i64..5_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Accrued interest is always rounded to cents.
    #[test]
    fn prop_interest_has_at_most_two_decimals(b in balance(), r in annual_rate()) {
        let interest = monthly_interest(b, r);
        prop_assert!(interest.scale() <= 2);
    }

    /// Interest on a non-negative balance is never negative.
    #[test]
    fn prop_interest_is_non_negative(b in balance(), r in annual_rate()) {
        prop_assert!(monthly_interest(b, r) >= Decimal::ZERO);
    }

    /// A larger balance never accrues less interest at the same rate.
    #[test]
    fn prop_interest_is_monotonic_in_balance(
        b in balance(),
        extra in (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        r in annual_rate(),
    ) {
        prop_assert!(monthly_interest(b + extra, r) >= monthly_interest(b, r));
    }

    /// The monthly rate never exceeds the annual rate.
    #[test]
    fn prop_monthly_rate_below_annual(r in annual_rate()) {
        let monthly = monthly_rate_percent(r);
        prop_assert!(monthly > Decimal::ZERO);
        prop_assert!(monthly < r);
    }
}
