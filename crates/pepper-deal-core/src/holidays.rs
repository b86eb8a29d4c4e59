//! Holiday calendar used by the deposit-date rule.
//!
//! The calendar is a read-only set of dates. `us_federal` builds the standard
//! US federal calendar including observed dates; callers with their own list
//! use `from_dates`.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// US federal holidays (with observed dates) for every year in `years`.
    pub fn us_federal<I: IntoIterator<Item = i32>>(years: I) -> Self {
        Self::from_dates(years.into_iter().flat_map(us_federal_holidays))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Holidays falling in the same ISO week (Monday to Sunday) as `date`.
    pub fn in_iso_week(&self, date: NaiveDate) -> Vec<NaiveDate> {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let Some(monday) = date.checked_sub_days(Days::new(offset)) else {
            return Vec::new();
        };
        let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        self.dates.range(monday..=sunday).copied().collect()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// The eleven US federal holidays for `year`, plus observed weekday dates for
/// fixed-date holidays that land on a weekend.
pub fn us_federal_holidays(year: i32) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(14);

    let mut fixed = vec![(1, 1), (7, 4), (11, 11), (12, 25)];
    if year >= 2021 {
        fixed.push((6, 19));
    }
    for (month, day) in fixed {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            dates.push(date);
            if let Some(observed) = observed_date(date) {
                dates.push(observed);
            }
        }
    }

    // Martin Luther King Jr. Day, Washington's Birthday, Labor Day,
    // Columbus Day, Thanksgiving
    let floating = [
        (1, Weekday::Mon, 3),
        (2, Weekday::Mon, 3),
        (9, Weekday::Mon, 1),
        (10, Weekday::Mon, 2),
        (11, Weekday::Thu, 4),
    ];
    for (month, weekday, n) in floating {
        if let Some(date) = NaiveDate::from_weekday_of_month_opt(year, month, weekday, n) {
            dates.push(date);
        }
    }

    if let Some(memorial) = last_weekday_of_month(year, 5, Weekday::Mon) {
        dates.push(memorial);
    }

    dates.sort();
    dates
}

/// Saturday holidays are observed on Friday, Sunday holidays on Monday.
fn observed_date(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_sub_days(Days::new(1)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => None,
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = first_of_next.pred_opt()?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last.checked_sub_days(Days::new(u64::from(back)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_federal_2024_known_dates() {
        let cal = HolidayCalendar::us_federal([2024]);
        for d in [
            date(2024, 1, 1),
            date(2024, 1, 15),
            date(2024, 2, 19),
            date(2024, 5, 27),
            date(2024, 6, 19),
            date(2024, 7, 4),
            date(2024, 9, 2),
            date(2024, 10, 14),
            date(2024, 11, 11),
            date(2024, 11, 28),
            date(2024, 12, 25),
        ] {
            assert!(cal.contains(d), "missing {d}");
        }
        assert_eq!(cal.len(), 11);
    }

    #[test]
    fn test_weekend_holidays_get_observed_dates() {
        // July 4th 2026 is a Saturday, Christmas 2022 a Sunday
        assert!(us_federal_holidays(2026).contains(&date(2026, 7, 3)));
        assert!(us_federal_holidays(2022).contains(&date(2022, 12, 26)));
    }

    #[test]
    fn test_no_juneteenth_before_2021() {
        assert!(!us_federal_holidays(2020).contains(&date(2020, 6, 19)));
    }

    #[test]
    fn test_last_monday_of_may() {
        assert_eq!(
            last_weekday_of_month(2025, 5, Weekday::Mon),
            Some(date(2025, 5, 26))
        );
        assert_eq!(
            last_weekday_of_month(2021, 5, Weekday::Mon),
            Some(date(2021, 5, 31))
        );
    }

    #[test]
    fn test_in_iso_week_bounds() {
        let cal = HolidayCalendar::from_dates([
            date(2024, 7, 1),
            date(2024, 7, 4),
            date(2024, 7, 7),
            date(2024, 7, 8),
        ]);
        // Week of Mon 2024-07-01 .. Sun 2024-07-07
        assert_eq!(
            cal.in_iso_week(date(2024, 7, 4)),
            vec![date(2024, 7, 1), date(2024, 7, 4), date(2024, 7, 7)]
        );
        assert_eq!(cal.in_iso_week(date(2024, 7, 9)), vec![date(2024, 7, 8)]);
    }
}
