use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::interval::Interval;
use crate::types::{round_cents, Money, Rate};
use crate::MortgageResult;

/// Fixed-payment calculator for a single loan.
///
/// Validated at construction; instances are immutable and the `with_*`
/// methods return new, re-validated values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentCalculator {
    interval: Interval,
    loan_amount: Money,
    annual_rate: Rate,
    years: u32,
}

impl PaymentCalculator {
    /// Creates a calculator for `loan_amount` at `annual_rate` percent over
    /// `years`, paid on `interval`.
    pub fn new(
        interval: Interval,
        loan_amount: Money,
        annual_rate: Rate,
        years: u32,
    ) -> MortgageResult<Self> {
        if !interval.is_schedule_interval() {
            return Err(MortgageError::invalid(
                "interval",
                "the regular payment interval must be weekly, biweekly, or monthly",
            ));
        }
        if loan_amount <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "loan_amount",
                "loan amount must be positive",
            ));
        }
        if annual_rate < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "annual_rate",
                "interest rate must not be negative",
            ));
        }
        if years < 1 {
            return Err(MortgageError::invalid(
                "years",
                "term must be at least one year",
            ));
        }
        Ok(Self {
            interval,
            loan_amount,
            annual_rate,
            years,
        })
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn loan_amount(&self) -> Money {
        self.loan_amount
    }

    /// Annual interest rate in percent (5.75 = 5.75%).
    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    /// Interest rate per payment period, as a decimal.
    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate / dec!(100) / Decimal::from(self.interval.payments_per_year())
    }

    /// Total number of payments over the full term.
    pub fn payment_count(&self) -> u32 {
        self.years * self.interval.payments_per_year()
    }

    /// The fixed periodic payment at full precision.
    ///
    /// Level-pay annuity: `L * r / (1 - (1 + r)^-n)`. A zero rate falls
    /// back to straight-line `L / n`; the annuity form would divide by
    /// zero.
    pub fn payment_unrounded(&self) -> Money {
        let n = self.payment_count();
        let rate = self.periodic_rate();
        if rate.is_zero() {
            return self.loan_amount / Decimal::from(n);
        }
        let discount = (Decimal::ONE + rate).powi(-i64::from(n));
        self.loan_amount * rate / (Decimal::ONE - discount)
    }

    /// The fixed periodic payment rounded to the cent, half-even.
    pub fn payment(&self) -> Money {
        round_cents(self.payment_unrounded())
    }

    pub fn with_interval(self, interval: Interval) -> MortgageResult<Self> {
        Self::new(interval, self.loan_amount, self.annual_rate, self.years)
    }

    pub fn with_loan_amount(self, loan_amount: Money) -> MortgageResult<Self> {
        Self::new(self.interval, loan_amount, self.annual_rate, self.years)
    }

    pub fn with_annual_rate(self, annual_rate: Rate) -> MortgageResult<Self> {
        Self::new(self.interval, self.loan_amount, annual_rate, self.years)
    }

    pub fn with_years(self, years: u32) -> MortgageResult<Self> {
        Self::new(self.interval, self.loan_amount, self.annual_rate, years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_payment_canonical_loan() {
        // 100k at 6% over 30 years, monthly.
        let calc =
            PaymentCalculator::new(Interval::Monthly, dec!(100000), dec!(6.0), 30).unwrap();
        assert_eq!(calc.periodic_rate(), dec!(0.005));
        assert_eq!(calc.payment_count(), 360);
        assert_eq!(calc.payment(), dec!(599.55));
        assert!((calc.payment_unrounded() - dec!(599.5505)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let calc = PaymentCalculator::new(Interval::Monthly, dec!(12000), dec!(0), 1).unwrap();
        assert_eq!(calc.payment_unrounded(), dec!(1000));
        assert_eq!(calc.payment(), dec!(1000.00));
    }

    #[test]
    fn test_biweekly_count() {
        let calc = PaymentCalculator::new(Interval::Biweekly, dec!(50000), dec!(5), 15).unwrap();
        assert_eq!(calc.payment_count(), 390);
    }

    #[test]
    fn test_rejects_extra_payment_intervals() {
        for interval in [Interval::Yearly, Interval::OneTime] {
            let err = PaymentCalculator::new(interval, dec!(100000), dec!(6), 30).unwrap_err();
            assert!(matches!(
                err,
                MortgageError::InvalidInput { ref field, .. } if field == "interval"
            ));
        }
    }

    #[test]
    fn test_rejects_out_of_range_inputs() {
        assert!(PaymentCalculator::new(Interval::Monthly, dec!(0), dec!(6), 30).is_err());
        assert!(PaymentCalculator::new(Interval::Monthly, dec!(-1), dec!(6), 30).is_err());
        assert!(PaymentCalculator::new(Interval::Monthly, dec!(100000), dec!(-0.1), 30).is_err());
        assert!(PaymentCalculator::new(Interval::Monthly, dec!(100000), dec!(6), 0).is_err());
    }

    #[test]
    fn test_with_methods_revalidate() {
        let calc =
            PaymentCalculator::new(Interval::Monthly, dec!(100000), dec!(6.0), 30).unwrap();
        let cheaper = calc.with_annual_rate(dec!(5.0)).unwrap();
        assert_eq!(cheaper.loan_amount(), dec!(100000));
        assert_eq!(cheaper.annual_rate(), dec!(5.0));
        assert!(calc.with_loan_amount(dec!(-5)).is_err());
        assert!(calc.with_interval(Interval::OneTime).is_err());
    }
}
