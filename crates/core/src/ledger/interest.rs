//! Interest rate math.
//!
//! All rates are expressed in percent per annum and converted here with
//! `Decimal` arithmetic only.

use rust_decimal::Decimal;

const MONTHS_PER_YEAR: u32 = 12;

/// Monthly rate as a percentage: annual percent ÷ 12.
#[must_use]
pub fn monthly_rate_percent(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / Decimal::from(MONTHS_PER_YEAR)
}

/// Monthly rate as a fraction: annual percent ÷ 12 ÷ 100.
#[must_use]
pub fn monthly_rate_fraction(annual_rate_percent: Decimal) -> Decimal {
    monthly_rate_percent(annual_rate_percent) / Decimal::ONE_HUNDRED
}

/// Interest accrued on `balance` for one month, rounded to cents with
/// Banker's Rounding.
#[must_use]
pub fn monthly_interest(balance: Decimal, annual_rate_percent: Decimal) -> Decimal {
    (balance * monthly_rate_fraction(annual_rate_percent)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_percent() {
        assert_eq!(monthly_rate_percent(dec!(12)), dec!(1));
        assert_eq!(monthly_rate_percent(dec!(6)), dec!(0.5));
    }

    #[test]
    fn test_monthly_rate_fraction() {
        assert_eq!(monthly_rate_fraction(dec!(12)), dec!(0.01));
    }

    #[test]
    fn test_twelve_percent_on_ten_thousand() {
        // 10,000 × (12 / 12 / 100) = 100
        assert_eq!(monthly_interest(dec!(10000), dec!(12)), dec!(100));
    }

    #[test]
    fn test_interest_rounds_to_cents() {
        // 1,234.56 × 0.005 = 6.1728 → 6.17
        assert_eq!(monthly_interest(dec!(1234.56), dec!(6)), dec!(6.17));
    }

    #[test]
    fn test_zero_balance_accrues_nothing() {
        assert_eq!(monthly_interest(dec!(0), dec!(12)), dec!(0));
    }
}
