use rust_decimal::{Decimal, RoundingStrategy};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Interest rates. Annual rates are quoted in percent (5.75 = 5.75%);
/// periodic rates are decimals (0.005 = 0.5% per period).
pub type Rate = Decimal;

/// Rounds to the cent with banker's rounding (half-even).
///
/// Applied only at presentation boundaries. Balances and cumulative
/// interest carried between periods stay at full precision; rounding the
/// carried state would accumulate error across the schedule.
pub fn round_cents(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cents_half_even() {
        // Ties go to the even cent in both directions.
        assert_eq!(round_cents(dec!(2.675)), dec!(2.68));
        assert_eq!(round_cents(dec!(2.665)), dec!(2.66));
        assert_eq!(round_cents(dec!(2.685)), dec!(2.68));
    }

    #[test]
    fn test_round_cents_plain() {
        assert_eq!(round_cents(dec!(123.333333)), dec!(123.33));
        assert_eq!(round_cents(dec!(599.5505251527)), dec!(599.55));
    }
}
