//! Rounding policy
//!
//! Computation stays exact; values are rounded to the currency's minor unit
//! (midpoint away from zero) only when they leave the engine for display.

use rust_decimal::Decimal;

use core_kernel::{Money, MoneyError};

/// Presentation rounding and guarded derived figures
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecisionPolicy;

impl PrecisionPolicy {
    /// Rounded amount for display
    pub fn present(money: &Money) -> Decimal {
        money.round_to_currency().amount()
    }

    /// Rounds a bare decimal to two places, midpoint away from zero
    pub fn present_decimal(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    /// `total / members`, computed exactly; zero when there are no members
    pub fn average_per_member(total: &Money, members: usize) -> Result<Money, MoneyError> {
        if members == 0 {
            return Ok(Money::zero(total.currency()));
        }
        total.divide(Decimal::from(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_present_rounds_half_away_from_zero() {
        assert_eq!(PrecisionPolicy::present(&Money::new(dec!(2.345), Currency::USD)), dec!(2.35));
        assert_eq!(PrecisionPolicy::present(&Money::new(dec!(-2.345), Currency::USD)), dec!(-2.35));
        assert_eq!(PrecisionPolicy::present_decimal(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn test_average_is_exact_until_presented() {
        let total = Money::new(dec!(100), Currency::NPR);
        let avg = PrecisionPolicy::average_per_member(&total, 3).unwrap();

        assert!(avg.amount() > dec!(33.33));
        assert_eq!(PrecisionPolicy::present(&avg), dec!(33.33));
    }

    #[test]
    fn test_average_over_no_members_is_zero() {
        let total = Money::new(dec!(100), Currency::EUR);
        let avg = PrecisionPolicy::average_per_member(&total, 0).unwrap();
        assert!(avg.is_zero());
        assert_eq!(avg.currency(), Currency::EUR);
    }
}
