//! calendar arithmetic shared by the expander and the accrual calculator.
//!
//! everything here works on `NaiveDate`; there is no elapsed-milliseconds
//! rounding anywhere in the crate.

use chrono::{Datelike, Duration, Months, NaiveDate};
use hourglass_rs::SafeTimeProvider;

use crate::errors::{ProjectionError, Result};
use crate::types::Interval;

/// calendar date of "now" according to the injected clock
pub fn today(time_provider: &SafeTimeProvider) -> NaiveDate {
    time_provider.now().date_naive()
}

/// check if year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) { 29 } else { 28 }
        }
    }
}

/// number of days in the month containing `date`
pub fn days_in_month_of(date: NaiveDate) -> u32 {
    days_in_month(date.year(), date.month())
}

/// shift by whole calendar months, clamping the day to the target month
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ProjectionError::InvalidDate {
            message: format!("{} + {} months is out of range", date, months),
        })
}

/// shift back by whole calendar months, clamping the day to the target month
pub fn sub_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| ProjectionError::InvalidDate {
            message: format!("{} - {} months is out of range", date, months),
        })
}

/// advance a date by one interval unit
pub fn step(date: NaiveDate, interval: Interval) -> Result<NaiveDate> {
    match interval {
        Interval::Weekly => date
            .checked_add_signed(Duration::days(7))
            .ok_or_else(|| ProjectionError::InvalidDate {
                message: format!("{} + 7 days is out of range", date),
            }),
        Interval::Monthly => add_months(date, 1),
        Interval::Yearly => add_months(date, 12),
    }
}

/// whole days from `start` to `end`, never negative
pub fn whole_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
