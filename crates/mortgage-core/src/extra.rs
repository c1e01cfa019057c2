use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::interval::Interval;
use crate::period::PeriodKey;
use crate::types::Money;
use crate::MortgageResult;

/// A supplemental principal payment series.
///
/// Applies `amount` on the start key's date and on each subsequent date
/// reached by advancing the start key's interval, for `count` occurrences
/// total. The interval may be any [`Interval`], including `Yearly` and
/// `OneTime`. Each occurrence date must coincide exactly with a regular
/// payment due date to take effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtraPayment {
    start: PeriodKey,
    count: u32,
    amount: Money,
}

impl ExtraPayment {
    pub fn new(start: PeriodKey, count: u32, amount: Money) -> MortgageResult<Self> {
        if count < 1 {
            return Err(MortgageError::invalid(
                "count",
                "the extra payment must apply at least once",
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "amount",
                "the extra payment amount must be positive",
            ));
        }
        Ok(Self {
            start,
            count,
            amount,
        })
    }

    pub fn start(&self) -> PeriodKey {
        self.start
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn with_start(self, start: PeriodKey) -> Self {
        Self { start, ..self }
    }

    pub fn with_count(self, count: u32) -> MortgageResult<Self> {
        Self::new(self.start, count, self.amount)
    }

    pub fn with_amount(self, amount: Money) -> MortgageResult<Self> {
        Self::new(self.start, self.count, amount)
    }
}

/// Merged extra-payment amounts keyed by due date.
pub type ExtraPaymentMap = BTreeMap<NaiveDate, Money>;

/// Walk state for one [`ExtraPayment`] during the merge.
struct Cursor {
    key: PeriodKey,
    remaining: u32,
    amount: Money,
}

/// Merges extra-payment series onto the regular payment calendar.
///
/// Walks the regular key sequence from the period after `start` for up to
/// `total_periods` periods. At each step every cursor whose current date
/// matches the step's date contributes its amount to that date's total and
/// advances; exhausted cursors drop out, and the walk stops early once all
/// are exhausted, so short extra-payment series never force a full-term
/// walk. A `OneTime` series exhausts after a single application regardless
/// of its count. Series whose dates never coincide with the regular
/// calendar silently contribute nothing.
///
/// An empty `extras` slice yields an empty map.
pub fn build_extra_payment_map(
    extras: &[ExtraPayment],
    start: PeriodKey,
    total_periods: u32,
) -> MortgageResult<ExtraPaymentMap> {
    let mut map = ExtraPaymentMap::new();
    if extras.is_empty() {
        return Ok(map);
    }

    // Snapshot cursor state up front; the walk never reads `extras` again.
    let mut cursors: Vec<Cursor> = extras
        .iter()
        .map(|extra| Cursor {
            key: extra.start(),
            remaining: extra.count(),
            amount: extra.amount(),
        })
        .collect();

    let mut key = start.next()?;
    let mut periods = total_periods;

    while periods > 0 && !cursors.is_empty() {
        let date = key.date();
        let mut due = Decimal::ZERO;

        for cursor in &mut cursors {
            if cursor.key.date() == date {
                due += cursor.amount;
                if cursor.key.interval() == Interval::OneTime {
                    cursor.remaining = 0;
                } else {
                    cursor.key = cursor.key.next()?;
                    cursor.remaining -= 1;
                }
            }
        }
        // Dropping exhausted cursors after the pass keeps two series that
        // finish on the same date from shadowing one another.
        cursors.retain(|cursor| cursor.remaining > 0);

        if due > Decimal::ZERO {
            map.insert(date, due);
        }
        key = key.next()?;
        periods -= 1;
    }

    Ok(map)
}
