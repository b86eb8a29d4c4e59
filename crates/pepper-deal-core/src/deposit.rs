//! Expected deposit date for resale proceeds.
//!
//! Buyers settle on a weekly cycle: the base Sunday is the coming Sunday (or
//! today when today is Sunday), and cash lands on the Thursday after it. A
//! Tuesday to Friday holiday in that week pushes the deposit back one day. Any
//! payment delay is added on top, in whole weeks.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::holidays::HolidayCalendar;
use crate::{PepperDealError, PepperDealResult};

/// Days from the base Sunday to the payout Thursday.
const SUNDAY_TO_PAYOUT_DAYS: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositSchedule {
    pub base_sunday: NaiveDate,
    pub deposit_date: NaiveDate,
    /// Holiday that moved the payout back a day, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifted_by_holiday: Option<NaiveDate>,
}

/// The coming Sunday, or `today` itself when it is a Sunday.
pub fn next_sunday(today: NaiveDate) -> PepperDealResult<NaiveDate> {
    let days = 6 - today.weekday().num_days_from_monday();
    add_days(today, u64::from(days))
}

pub fn deposit_date(
    today: NaiveDate,
    delay_weeks: u32,
    calendar: &HolidayCalendar,
) -> PepperDealResult<DepositSchedule> {
    let base_sunday = next_sunday(today)?;
    let mut payout = add_days(base_sunday, SUNDAY_TO_PAYOUT_DAYS)?;

    let shifted_by_holiday = calendar
        .in_iso_week(payout)
        .into_iter()
        .find(|h| is_shifting_weekday(h.weekday()));
    if shifted_by_holiday.is_some() {
        payout = add_days(payout, 1)?;
    }

    let deposit_date = add_days(payout, u64::from(delay_weeks) * 7)?;

    Ok(DepositSchedule {
        base_sunday,
        deposit_date,
        shifted_by_holiday,
    })
}

fn is_shifting_weekday(weekday: Weekday) -> bool {
    matches!(
        weekday,
        Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri
    )
}

fn add_days(date: NaiveDate, days: u64) -> PepperDealResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| PepperDealError::DateError(format!("{date} + {days} days is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_sunday_from_each_weekday() {
        // 2024-06-03 is a Monday
        for offset in 0..6 {
            let today = date(2024, 6, 3 + offset);
            assert_eq!(next_sunday(today).unwrap(), date(2024, 6, 9));
        }
        assert_eq!(next_sunday(date(2024, 6, 9)).unwrap(), date(2024, 6, 9));
    }

    #[test]
    fn test_deposit_is_thursday_after_base_sunday() {
        let s = deposit_date(date(2024, 6, 5), 0, &HolidayCalendar::default()).unwrap();
        assert_eq!(s.base_sunday, date(2024, 6, 9));
        assert_eq!(s.deposit_date, date(2024, 6, 13));
        assert_eq!(s.deposit_date.weekday(), Weekday::Thu);
        assert_eq!(s.shifted_by_holiday, None);
    }

    #[test]
    fn test_delay_weeks_added_after_shift() {
        let s = deposit_date(date(2024, 6, 5), 4, &HolidayCalendar::default()).unwrap();
        assert_eq!(s.deposit_date, date(2024, 7, 11));
    }

    #[test]
    fn test_midweek_holiday_shifts_one_day() {
        // Payout Thursday 2024-07-04 is itself Independence Day
        let cal = HolidayCalendar::us_federal([2024]);
        let s = deposit_date(date(2024, 6, 26), 0, &cal).unwrap();
        assert_eq!(s.base_sunday, date(2024, 6, 30));
        assert_eq!(s.deposit_date, date(2024, 7, 5));
        assert_eq!(s.shifted_by_holiday, Some(date(2024, 7, 4)));
    }

    #[test]
    fn test_friday_holiday_in_week_shifts() {
        let cal = HolidayCalendar::from_dates([date(2024, 6, 14)]);
        let s = deposit_date(date(2024, 6, 5), 0, &cal).unwrap();
        assert_eq!(s.deposit_date, date(2024, 6, 14));
    }

    #[test]
    fn test_monday_holiday_does_not_shift() {
        // Labor Day 2024-09-02 is a Monday; payout Thursday 2024-09-05
        let cal = HolidayCalendar::us_federal([2024]);
        let s = deposit_date(date(2024, 8, 28), 0, &cal).unwrap();
        assert_eq!(s.deposit_date, date(2024, 9, 5));
        assert_eq!(s.shifted_by_holiday, None);
    }

    #[test]
    fn test_holiday_in_neighbouring_week_ignored() {
        let cal = HolidayCalendar::from_dates([date(2024, 6, 18)]);
        let s = deposit_date(date(2024, 6, 5), 0, &cal).unwrap();
        assert_eq!(s.deposit_date, date(2024, 6, 13));
    }

    #[test]
    fn test_overflow_is_date_error() {
        let err = deposit_date(NaiveDate::MAX, 16, &HolidayCalendar::default()).unwrap_err();
        assert!(matches!(err, PepperDealError::DateError(_)));
    }
}
