use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{round_cents, Money};
use crate::MortgageResult;

/// Default divisor when less than 10% is down.
const DFLT_UNDER_10_DIVISOR: Decimal = dec!(1500);

/// Default divisor when 10% to under 15% is down.
const DFLT_UNDER_15_DIVISOR: Decimal = dec!(2300);

/// Default divisor when 15% to under 20% is down.
const DFLT_UNDER_20_DIVISOR: Decimal = dec!(3700);

/// Monthly PMI estimated from a banded divisor table.
///
/// The loan-to-down band picks a divisor for the financed amount; 20% or
/// more down owes no PMI. Divisors are configurable for lenders with
/// different tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmiCalculator {
    under_10_divisor: Decimal,
    under_15_divisor: Decimal,
    under_20_divisor: Decimal,
}

impl Default for PmiCalculator {
    fn default() -> Self {
        Self {
            under_10_divisor: DFLT_UNDER_10_DIVISOR,
            under_15_divisor: DFLT_UNDER_15_DIVISOR,
            under_20_divisor: DFLT_UNDER_20_DIVISOR,
        }
    }
}

impl PmiCalculator {
    /// Creates a calculator with custom band divisors.
    pub fn new(
        under_10_divisor: Decimal,
        under_15_divisor: Decimal,
        under_20_divisor: Decimal,
    ) -> MortgageResult<Self> {
        for (field, divisor) in [
            ("under_10_divisor", under_10_divisor),
            ("under_15_divisor", under_15_divisor),
            ("under_20_divisor", under_20_divisor),
        ] {
            if divisor <= Decimal::ZERO {
                return Err(MortgageError::invalid(field, "divisor must be positive"));
            }
        }
        Ok(Self {
            under_10_divisor,
            under_15_divisor,
            under_20_divisor,
        })
    }

    /// Monthly PMI owed for `amount_down` on a home worth `home_value`,
    /// rounded to the cent.
    pub fn monthly_pmi(&self, home_value: Money, amount_down: Money) -> MortgageResult<Money> {
        if home_value <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "home_value",
                "home value must be positive",
            ));
        }
        if amount_down < Decimal::ZERO || amount_down > home_value {
            return Err(MortgageError::invalid(
                "amount_down",
                "down payment must be between zero and the home value",
            ));
        }

        let down_pct = amount_down * dec!(100) / home_value;
        let financed = home_value - amount_down;
        let pmi = if down_pct < dec!(10) {
            financed / self.under_10_divisor
        } else if down_pct < dec!(15) {
            financed / self.under_15_divisor
        } else if down_pct < dec!(20) {
            financed / self.under_20_divisor
        } else {
            Decimal::ZERO
        };
        Ok(round_cents(pmi))
    }
}
