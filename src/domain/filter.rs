//! Filter values shared by list pages, the API and exports.

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::domain::lead::LeadStatus;
use crate::domain::owner::OwnerRef;
use crate::domain::types::TypeConstraintError;

/// Inclusive calendar-day range. `from` never follows `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// First instant inside the range.
    pub fn start(&self) -> NaiveDateTime {
        self.from.and_time(NaiveTime::MIN)
    }

    /// First instant after the range, `None` at the end of the calendar.
    pub fn end_exclusive(&self) -> Option<NaiveDateTime> {
        self.to.succ_opt().map(|day| day.and_time(NaiveTime::MIN))
    }

    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        moment >= self.start() && self.end_exclusive().is_none_or(|end| moment < end)
    }
}

/// Named ranges offered by the date picker, resolved against "today".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePreset {
    Today,
    Last7Days,
    Last30Days,
    ThisMonth,
    ThisYear,
}

impl DatePreset {
    pub const ALL: [DatePreset; 5] = [
        DatePreset::Today,
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::ThisMonth,
        DatePreset::ThisYear,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Last7Days => "last_7_days",
            DatePreset::Last30Days => "last_30_days",
            DatePreset::ThisMonth => "this_month",
            DatePreset::ThisYear => "this_year",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Last7Days => "Last 7 days",
            DatePreset::Last30Days => "Last 30 days",
            DatePreset::ThisMonth => "This month",
            DatePreset::ThisYear => "This year",
        }
    }

    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let from = match self {
            DatePreset::Today => Some(today),
            DatePreset::Last7Days => today.checked_sub_days(Days::new(6)),
            DatePreset::Last30Days => today.checked_sub_days(Days::new(29)),
            DatePreset::ThisMonth => today.with_day(1),
            DatePreset::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        };
        DateRange {
            from: from.unwrap_or(today),
            to: today,
        }
    }
}

impl FromStr for DatePreset {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatePreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown date preset `{s}`")))
    }
}

/// Every filter dimension of a lead list. The default value filters nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterSet {
    pub statuses: Vec<LeadStatus>,
    pub owners: Vec<OwnerRef>,
    pub date_range: Option<DateRange>,
    pub source: Option<String>,
    pub search: Option<String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(DateRange::new(day(2024, 3, 2), day(2024, 3, 1)).is_none());
        assert!(DateRange::new(day(2024, 3, 1), day(2024, 3, 1)).is_some());
    }

    #[test]
    fn range_covers_whole_last_day() {
        let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 2)).unwrap();
        let late = day(2024, 3, 2).and_hms_opt(23, 59, 59).unwrap();
        let next = day(2024, 3, 3).and_time(NaiveTime::MIN);
        assert!(range.contains(late));
        assert!(!range.contains(next));
    }

    #[test]
    fn presets_resolve_relative_to_today() {
        let today = day(2024, 5, 15);
        assert_eq!(
            DatePreset::Last7Days.resolve(today),
            DateRange::new(day(2024, 5, 9), today).unwrap()
        );
        assert_eq!(DatePreset::ThisMonth.resolve(today).from(), day(2024, 5, 1));
        assert_eq!(DatePreset::ThisYear.resolve(today).from(), day(2024, 1, 1));
        assert_eq!("last_30_days".parse(), Ok(DatePreset::Last30Days));
    }
}
