//! Unit tests for the Money module
//!
//! Tests cover creation, predicates, checked arithmetic, presentation
//! rounding and currency handling.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_does_not_round() {
        let m = Money::new(dec!(33.333333333), Currency::USD);
        assert_eq!(m.amount(), dec!(33.333333333));
    }

    #[test]
    fn test_from_minor_converts_cents_correctly() {
        let m = Money::from_minor(10050, Currency::GBP);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_is_positive() {
        assert!(Money::new(dec!(0.01), Currency::USD).is_positive());
        assert!(!Money::new(dec!(-0.01), Currency::USD).is_positive());
        assert!(!Money::zero(Currency::USD).is_positive());
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::new(dec!(-0.01), Currency::USD).is_negative());
        assert!(!Money::new(dec!(0.01), Currency::USD).is_negative());
        assert!(!Money::zero(Currency::USD).is_negative());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::new(dec!(0.1), Currency::USD);
        let b = Money::new(dec!(0.2), Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(0.3));
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::new(dec!(15), Currency::USD);
        let b = Money::new(dec!(30), Currency::USD);
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(-15));
    }

    #[test]
    fn test_checked_sub_currency_mismatch() {
        let a = Money::new(dec!(15), Currency::USD);
        let b = Money::new(dec!(30), Currency::NPR);
        assert_eq!(
            a.checked_sub(&b),
            Err(MoneyError::CurrencyMismatch("USD".to_string(), "NPR".to_string()))
        );
    }

    #[test]
    fn test_checked_min_picks_smaller() {
        let a = Money::new(dec!(40), Currency::USD);
        let b = Money::new(dec!(80), Currency::USD);
        assert_eq!(a.checked_min(&b).unwrap(), a);
        assert_eq!(b.checked_min(&a).unwrap(), a);
    }

    #[test]
    fn test_negation() {
        let m = Money::new(dec!(12.5), Currency::USD);
        assert_eq!((-m).amount(), dec!(-12.5));
    }

    #[test]
    fn test_divide_by_scalar_keeps_precision() {
        let m = Money::new(dec!(100), Currency::USD);
        let third = m.divide(Decimal::from(3)).unwrap();
        assert_eq!(third.round_to_currency().amount(), dec!(33.33));
        assert!(third.amount() > dec!(33.33));
    }

    #[test]
    fn test_divide_by_zero_error() {
        let m = Money::new(dec!(100), Currency::USD);
        assert_eq!(m.divide(Decimal::ZERO), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_checked_add_overflow_is_an_error() {
        let max = Money::new(Decimal::MAX, Currency::USD);
        assert_eq!(max.checked_add(&max), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_checked_sub_overflow_is_an_error() {
        let min = Money::new(Decimal::MIN, Currency::USD);
        let max = Money::new(Decimal::MAX, Currency::USD);
        assert_eq!(min.checked_sub(&max), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_divide_overflow_is_an_error() {
        let max = Money::new(Decimal::MAX, Currency::USD);
        assert_eq!(max.divide(dec!(0.1)), Err(MoneyError::Overflow));
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency_two_places() {
        let m = Money::new(dec!(10.005), Currency::USD);
        assert_eq!(m.round_to_currency().amount(), dec!(10.01));
    }

    #[test]
    fn test_abs_negative() {
        let m = Money::new(dec!(-80), Currency::USD);
        assert_eq!(m.abs().amount(), dec!(80));
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_all_currencies_have_symbols() {
        for currency in Currency::ALL {
            assert!(!currency.symbol().is_empty());
            assert_eq!(currency.decimal_places(), 2);
        }
    }

    #[test]
    fn test_currency_round_trips_through_code() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>(), Ok(currency));
        }
    }

    #[test]
    fn test_money_display_npr() {
        let m = Money::new(dec!(1500), Currency::NPR);
        assert_eq!(m.to_string(), "Rs.1500.00");
    }
}
