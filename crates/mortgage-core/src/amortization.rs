use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extra::{build_extra_payment_map, ExtraPayment, ExtraPaymentMap};
use crate::payment::PaymentCalculator;
use crate::period::PeriodKey;
use crate::types::{round_cents, Money, Rate};
use crate::MortgageResult;

/// One row of an amortization schedule.
///
/// Fields hold the full-precision values carried into the next period.
/// The plain accessors round half-even to the cent for presentation; the
/// `*_unrounded` accessors expose the carried state. Rounding is never
/// applied between periods — only at these accessors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    total: Money,
    principal: Money,
    interest: Money,
    balance: Money,
    cumulative_interest: Money,
}

impl PaymentRecord {
    /// Applies one payment to `balance`.
    fn apply(
        balance: Money,
        cumulative_interest: Money,
        periodic_rate: Rate,
        payment: Money,
        extra: Money,
    ) -> Self {
        let interest = balance * periodic_rate;
        // The cap keeps the final payment from overshooting a zero balance;
        // it is what lets extra payments shorten the schedule.
        let total = (balance + interest).min(payment + extra);
        let principal = total - interest;
        Self {
            total,
            principal,
            interest,
            balance: balance - principal,
            cumulative_interest: cumulative_interest + interest,
        }
    }

    /// Total paid this period, rounded to the cent.
    pub fn total(&self) -> Money {
        round_cents(self.total)
    }

    /// Principal portion, rounded to the cent.
    pub fn principal(&self) -> Money {
        round_cents(self.principal)
    }

    /// Interest portion, rounded to the cent.
    pub fn interest(&self) -> Money {
        round_cents(self.interest)
    }

    /// Balance remaining after this payment, rounded to the cent.
    pub fn balance(&self) -> Money {
        round_cents(self.balance)
    }

    /// Interest paid to date, rounded to the cent.
    pub fn cumulative_interest(&self) -> Money {
        round_cents(self.cumulative_interest)
    }

    pub fn total_unrounded(&self) -> Money {
        self.total
    }

    pub fn principal_unrounded(&self) -> Money {
        self.principal
    }

    pub fn interest_unrounded(&self) -> Money {
        self.interest
    }

    pub fn balance_unrounded(&self) -> Money {
        self.balance
    }

    pub fn cumulative_interest_unrounded(&self) -> Money {
        self.cumulative_interest
    }
}

/// A chronologically ordered amortization schedule: one [`PaymentRecord`]
/// per due date, from the first period after the start date through payoff
/// or term exhaustion. Built fresh per invocation and returned by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmortizationTable {
    entries: BTreeMap<NaiveDate, PaymentRecord>,
}

impl AmortizationTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&PaymentRecord> {
        self.entries.get(&date)
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &PaymentRecord)> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<(&NaiveDate, &PaymentRecord)> {
        self.entries.iter().next()
    }

    pub fn last(&self) -> Option<(&NaiveDate, &PaymentRecord)> {
        self.entries.iter().next_back()
    }
}

impl<'a> IntoIterator for &'a AmortizationTable {
    type Item = (&'a NaiveDate, &'a PaymentRecord);
    type IntoIter = std::collections::btree_map::Iter<'a, NaiveDate, PaymentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds fixed-rate amortization schedules.
///
/// Drives the due-date sequence from the period after `start` and applies
/// the calculator's fixed payment each period, plus any extra amount due
/// on that date. The schedule ends when the balance rounds to zero or the
/// term's payment count is exhausted, whichever comes first.
#[derive(Debug, Clone, Copy)]
pub struct AmortizationBuilder {
    calculator: PaymentCalculator,
    start: PeriodKey,
    // Cached from the calculator; read every period.
    periodic_rate: Rate,
    payment: Money,
}

impl AmortizationBuilder {
    /// Creates a builder for `calculator` starting at `start`'s date. The
    /// regular schedule always advances by the loan's own interval, so
    /// `start`'s interval is replaced with the calculator's.
    pub fn new(calculator: PaymentCalculator, start: PeriodKey) -> Self {
        let start = start.with_interval(calculator.interval());
        Self {
            periodic_rate: calculator.periodic_rate(),
            payment: calculator.payment_unrounded(),
            calculator,
            start,
        }
    }

    pub fn calculator(&self) -> &PaymentCalculator {
        &self.calculator
    }

    pub fn start(&self) -> PeriodKey {
        self.start
    }

    pub fn with_calculator(self, calculator: PaymentCalculator) -> Self {
        Self::new(calculator, self.start)
    }

    pub fn with_start(self, start: PeriodKey) -> Self {
        Self::new(self.calculator, start)
    }

    /// Builds the schedule with no extra payments.
    pub fn build(&self) -> MortgageResult<AmortizationTable> {
        self.build_with_map(&ExtraPaymentMap::new())
    }

    /// Builds the schedule, applying the extra amounts in `extras`.
    ///
    /// Map keys must coincide exactly with regular due dates; entries on
    /// any other date are ignored. The map is only read for the duration
    /// of the call — the borrow stands in for the defensive snapshot a
    /// shared-collection caller would otherwise need.
    pub fn build_with_map(&self, extras: &ExtraPaymentMap) -> MortgageResult<AmortizationTable> {
        let mut entries = BTreeMap::new();
        let mut balance = self.calculator.loan_amount();
        let mut cumulative_interest = Decimal::ZERO;
        let mut key = self.start.next()?;
        let mut remaining = self.calculator.payment_count();

        while round_cents(balance) > Decimal::ZERO && remaining > 0 {
            let extra = extras.get(&key.date()).copied().unwrap_or(Decimal::ZERO);
            let record = PaymentRecord::apply(
                balance,
                cumulative_interest,
                self.periodic_rate,
                self.payment,
                extra,
            );
            balance = record.balance_unrounded();
            cumulative_interest = record.cumulative_interest_unrounded();
            entries.insert(key.date(), record);
            key = key.next()?;
            remaining -= 1;
        }

        Ok(AmortizationTable { entries })
    }

    /// Builds the schedule from raw extra-payment series.
    ///
    /// Convenience over [`build_extra_payment_map`] plus
    /// [`Self::build_with_map`]. Callers reusing the same series across
    /// several schedules should build the map once themselves.
    pub fn build_with_extras(&self, extras: &[ExtraPayment]) -> MortgageResult<AmortizationTable> {
        let map = build_extra_payment_map(extras, self.start, self.calculator.payment_count())?;
        self.build_with_map(&map)
    }
}
