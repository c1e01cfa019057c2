use serde::{Deserialize, Serialize};

/// Cadence of a payment series.
///
/// `Weekly`, `Biweekly`, and `Monthly` may drive the regular payment
/// schedule. `Yearly` and `OneTime` are valid only for extra-payment
/// schedules; [`crate::PaymentCalculator`] rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
    OneTime,
}

impl Interval {
    /// Number of payments per year. Zero for `OneTime`, which never recurs.
    pub fn payments_per_year(self) -> u32 {
        match self {
            Interval::Weekly => 52,
            Interval::Biweekly => 26,
            Interval::Monthly => 12,
            Interval::Yearly => 1,
            Interval::OneTime => 0,
        }
    }

    /// Whether the interval is valid for the regular payment schedule.
    pub fn is_schedule_interval(self) -> bool {
        matches!(
            self,
            Interval::Weekly | Interval::Biweekly | Interval::Monthly
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payments_per_year() {
        assert_eq!(Interval::Weekly.payments_per_year(), 52);
        assert_eq!(Interval::Biweekly.payments_per_year(), 26);
        assert_eq!(Interval::Monthly.payments_per_year(), 12);
        assert_eq!(Interval::Yearly.payments_per_year(), 1);
        assert_eq!(Interval::OneTime.payments_per_year(), 0);
    }

    #[test]
    fn test_schedule_intervals() {
        assert!(Interval::Weekly.is_schedule_interval());
        assert!(Interval::Biweekly.is_schedule_interval());
        assert!(Interval::Monthly.is_schedule_interval());
        assert!(!Interval::Yearly.is_schedule_interval());
        assert!(!Interval::OneTime.is_schedule_interval());
    }
}
