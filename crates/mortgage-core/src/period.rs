use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{Days, Local, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::interval::Interval;
use crate::MortgageResult;

/// Ordered identifier for a payment due date.
///
/// Wraps the due date together with the interval used to derive the next
/// due date. Only the calendar date matters for identity: equality,
/// ordering, and hashing ignore the interval, so two keys on the same date
/// compare equal even when their cadences differ. Time of day is never
/// significant and is not stored.
///
/// Keys are immutable; `next`, `next_nth`, and `with_interval` return new
/// values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodKey {
    date: NaiveDate,
    interval: Interval,
}

impl PeriodKey {
    pub fn new(interval: Interval, date: NaiveDate) -> Self {
        Self { date, interval }
    }

    /// Key for today's date.
    pub fn today(interval: Interval) -> Self {
        Self::new(interval, Local::now().date_naive())
    }

    /// Parses `date_str` against the caller-supplied chrono `pattern`
    /// (e.g. `"%m/%d/%Y"`). A string that does not match the pattern is a
    /// caller input error, not a distinct parse failure class.
    pub fn parse(interval: Interval, date_str: &str, pattern: &str) -> MortgageResult<Self> {
        let date = NaiveDate::parse_from_str(date_str, pattern).map_err(|e| {
            MortgageError::invalid(
                "date_str",
                format!("{date_str:?} does not match pattern {pattern:?} ({e})"),
            )
        })?;
        Ok(Self::new(interval, date))
    }

    /// Key for the calendar date of `datetime`, discarding the time of day.
    pub fn from_datetime(interval: Interval, datetime: NaiveDateTime) -> Self {
        Self::new(interval, datetime.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns a key on the same date with the given interval.
    pub fn with_interval(self, interval: Interval) -> Self {
        Self { interval, ..self }
    }

    /// The next due date, one interval ahead.
    pub fn next(self) -> MortgageResult<Self> {
        self.next_nth(1)
    }

    /// The due date `n` intervals ahead.
    ///
    /// Advances in a single calendar add, so a month-end start clamps once
    /// (Jan 31 + 2 months = Mar 31, not Mar 28 via Feb). `OneTime` never
    /// advances and returns the key unchanged; callers looping on key
    /// progression must bound by count instead.
    pub fn next_nth(self, n: u32) -> MortgageResult<Self> {
        let date = match self.interval {
            Interval::Weekly => self.date.checked_add_days(Days::new(7 * u64::from(n))),
            Interval::Biweekly => self.date.checked_add_days(Days::new(14 * u64::from(n))),
            Interval::Monthly => self.date.checked_add_months(Months::new(n)),
            Interval::Yearly => n
                .checked_mul(12)
                .and_then(|months| self.date.checked_add_months(Months::new(months))),
            Interval::OneTime => return Ok(self),
        };
        match date {
            Some(date) => Ok(Self { date, ..self }),
            None => Err(MortgageError::DateError(format!(
                "date overflow advancing {} by {n} {:?} interval(s)",
                self.date, self.interval
            ))),
        }
    }
}

impl PartialEq for PeriodKey {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for PeriodKey {}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl Hash for PeriodKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_monthly() {
        let key = PeriodKey::new(Interval::Monthly, date(2009, 1, 15));
        assert_eq!(key.next().unwrap().date(), date(2009, 2, 15));
    }

    #[test]
    fn test_next_weekly_and_biweekly() {
        let weekly = PeriodKey::new(Interval::Weekly, date(2009, 1, 1));
        assert_eq!(weekly.next().unwrap().date(), date(2009, 1, 8));

        let biweekly = PeriodKey::new(Interval::Biweekly, date(2009, 1, 1));
        assert_eq!(biweekly.next().unwrap().date(), date(2009, 1, 15));
    }

    #[test]
    fn test_next_yearly() {
        let key = PeriodKey::new(Interval::Yearly, date(2009, 3, 1));
        assert_eq!(key.next().unwrap().date(), date(2010, 3, 1));
        assert_eq!(key.next_nth(5).unwrap().date(), date(2014, 3, 1));
    }

    #[test]
    fn test_one_time_never_advances() {
        let key = PeriodKey::new(Interval::OneTime, date(2009, 6, 1));
        assert_eq!(key.next().unwrap(), key);
        assert_eq!(key.next_nth(10).unwrap(), key);
    }

    #[test]
    fn test_month_end_clamps_once_for_next_nth() {
        let key = PeriodKey::new(Interval::Monthly, date(2009, 1, 31));
        // Single add from the base date clamps only where needed.
        assert_eq!(key.next().unwrap().date(), date(2009, 2, 28));
        assert_eq!(key.next_nth(2).unwrap().date(), date(2009, 3, 31));
        // Stepping twice drifts to the clamped day.
        assert_eq!(key.next().unwrap().next().unwrap().date(), date(2009, 3, 28));
    }

    #[test]
    fn test_equality_ignores_interval() {
        let a = PeriodKey::new(Interval::Monthly, date(2009, 1, 1));
        let b = PeriodKey::new(Interval::OneTime, date(2009, 1, 1));
        assert_eq!(a, b);
        assert!(a < PeriodKey::new(Interval::Weekly, date(2009, 1, 2)));
    }

    #[test]
    fn test_parse_valid_and_invalid() {
        let key = PeriodKey::parse(Interval::Monthly, "01/15/2009", "%m/%d/%Y").unwrap();
        assert_eq!(key.date(), date(2009, 1, 15));

        let err = PeriodKey::parse(Interval::Monthly, "not-a-date", "%m/%d/%Y").unwrap_err();
        assert!(matches!(
            err,
            MortgageError::InvalidInput { ref field, .. } if field == "date_str"
        ));
    }

    #[test]
    fn test_from_datetime_truncates_to_date() {
        let dt = date(2009, 1, 15).and_time(NaiveTime::from_hms_opt(13, 45, 9).unwrap());
        let key = PeriodKey::from_datetime(Interval::Monthly, dt);
        assert_eq!(key, PeriodKey::new(Interval::Monthly, date(2009, 1, 15)));
    }
}
