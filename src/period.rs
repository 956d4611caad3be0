//! Calendar billing periods.
//!
//! A [`Period`] is a `(year, month)` pair. Every place that needs to walk
//! "the months before X" goes through [`months_in_period_range`], which is
//! half-open: the start period is included, the end period never is.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::errors::{LedgerError, Result};

/// a calendar billing month
///
/// Fields are private so every period, deserialized ones included, has
/// passed the month check in [`Period::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    // field order gives the derived ordering: year, then month
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = LedgerError;

    fn try_from(raw: RawPeriod) -> Result<Self> {
        Period::new(raw.year, raw.month)
    }
}

impl Period {
    /// create a period, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::invalid_input(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// calendar month, 1..=12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// the period containing a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// first calendar day of the period
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// January of the previous year
    pub fn january_of_prior_year(&self) -> Self {
        Self {
            year: self.year - 1,
            month: 1,
        }
    }

    /// the following month, rolling december into january
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// the preceding month, rolling january into december
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// months from `self` up to `other`, negative when `other` is earlier
    pub fn months_until(&self, other: &Period) -> i64 {
        let from = self.year as i64 * 12 + self.month as i64;
        let to = other.year as i64 * 12 + other.month as i64;
        to - from
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// order two periods by year, then month
pub fn compare_periods(a: &Period, b: &Period) -> Ordering {
    a.cmp(b)
}

/// every period in `[start, end_exclusive)`, ascending
///
/// Within the start year the months run from `start.month`, intermediate
/// years are whole, and the end year stops at `end_exclusive.month - 1`.
/// When both share a year this is `start.month..end_exclusive.month`.
/// An end at or before the start yields nothing.
pub fn months_in_period_range(start: Period, end_exclusive: Period) -> PeriodRange {
    PeriodRange {
        next: start,
        end: end_exclusive,
    }
}

/// every period from `start` up to, but excluding, `target`
pub fn periods_before(start: Period, target: Period) -> PeriodRange {
    months_in_period_range(start, target)
}

/// half-open iterator over consecutive periods
#[derive(Debug, Clone)]
pub struct PeriodRange {
    next: Period,
    end: Period,
}

impl PeriodRange {
    pub fn is_empty(&self) -> bool {
        self.next >= self.end
    }
}

impl Iterator for PeriodRange {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        if self.is_empty() {
            return None;
        }
        let current = self.next;
        self.next = current.succ();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next.months_until(&self.end).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PeriodRange {}

impl FusedIterator for PeriodRange {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(Period::new(2024, 0).is_err());
        assert!(Period::new(2024, 13).is_err());
        assert!(Period::new(2024, 12).is_ok());
    }

    #[test]
    fn test_succ_and_pred_roll_over_year() {
        assert_eq!(p(2023, 12).succ(), p(2024, 1));
        assert_eq!(p(2024, 1).pred(), p(2023, 12));
        assert_eq!(p(2024, 6).succ(), p(2024, 7));
    }

    #[test]
    fn test_compare_periods() {
        assert_eq!(compare_periods(&p(2023, 12), &p(2024, 1)), Ordering::Less);
        assert_eq!(compare_periods(&p(2024, 3), &p(2024, 3)), Ordering::Equal);
        assert_eq!(compare_periods(&p(2024, 4), &p(2024, 3)), Ordering::Greater);
    }

    #[test]
    fn test_same_year_range() {
        let months: Vec<_> = months_in_period_range(p(2024, 1), p(2024, 3)).collect();
        assert_eq!(months, vec![p(2024, 1), p(2024, 2)]);
    }

    #[test]
    fn test_range_across_years() {
        let months: Vec<_> = months_in_period_range(p(2022, 11), p(2024, 2)).collect();
        assert_eq!(months.len(), 15);
        assert_eq!(months.first(), Some(&p(2022, 11)));
        assert_eq!(months[2], p(2023, 1));
        assert_eq!(months.last(), Some(&p(2024, 1)));
    }

    #[test]
    fn test_empty_ranges() {
        assert_eq!(months_in_period_range(p(2024, 3), p(2024, 3)).count(), 0);
        assert_eq!(months_in_period_range(p(2024, 5), p(2024, 3)).count(), 0);
        assert_eq!(months_in_period_range(p(2025, 1), p(2024, 12)).count(), 0);
        // end in january excludes the whole end year
        let months: Vec<_> = periods_before(p(2023, 12), p(2024, 1)).collect();
        assert_eq!(months, vec![p(2023, 12)]);
    }

    #[test]
    fn test_deserialize_checks_month() {
        let ok: Period = serde_json::from_str(r#"{"year":2024,"month":12}"#).unwrap();
        assert_eq!(ok, p(2024, 12));
        assert!(serde_json::from_str::<Period>(r#"{"year":2024,"month":13}"#).is_err());
        assert!(serde_json::from_str::<Period>(r#"{"year":2024,"month":0}"#).is_err());

        let json = serde_json::to_string(&p(2024, 3)).unwrap();
        assert_eq!(json, r#"{"year":2024,"month":3}"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(p(2024, 3).to_string(), "2024-03");
    }

    proptest! {
        #[test]
        fn range_length_matches_month_distance(
            y1 in 2000i32..2040, m1 in 1u32..=12,
            y2 in 2000i32..2040, m2 in 1u32..=12,
        ) {
            let start = p(y1, m1);
            let end = p(y2, m2);
            let range = months_in_period_range(start, end);
            let expected = start.months_until(&end).max(0) as usize;
            prop_assert_eq!(range.len(), expected);

            let months: Vec<_> = range.collect();
            prop_assert_eq!(months.len(), expected);
            for pair in months.windows(2) {
                prop_assert_eq!(pair[0].succ(), pair[1]);
            }
            prop_assert!(months.iter().all(|m| *m >= start && *m < end));
        }

        #[test]
        fn range_to_self_is_empty(y in 1990i32..2100, m in 1u32..=12) {
            prop_assert_eq!(months_in_period_range(p(y, m), p(y, m)).count(), 0);
        }

        #[test]
        fn succ_then_pred_is_identity(y in 1990i32..2100, m in 1u32..=12) {
            prop_assert_eq!(p(y, m).succ().pred(), p(y, m));
        }
    }
}
