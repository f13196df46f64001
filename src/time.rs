use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

use crate::errors::{DonationError, Result};
use crate::types::RecurrenceFrequency;

/// epoch seconds at midnight utc on the given day
pub fn start_of_day_epoch(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// advance one recurrence period from a calendar day
pub fn advance_period(date: NaiveDate, frequency: RecurrenceFrequency) -> Result<NaiveDate> {
    match frequency {
        RecurrenceFrequency::Weekly => Ok(date + Duration::days(7)),
        RecurrenceFrequency::Monthly => add_one_month(date),
    }
}

/// add one calendar month preserving the day-of-month; days past the end of
/// the target month roll into the following month (31 jan -> 3 mar)
fn add_one_month(date: NaiveDate) -> Result<NaiveDate> {
    let mut year = date.year();
    let mut month = date.month() + 1;
    if month > 12 {
        month = 1;
        year += 1;
    }

    let mut day = date.day();
    let in_month = days_in_month(year, month);
    if day > in_month {
        day -= in_month;
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DonationError::InvalidDate {
        message: format!("no such date: {year:04}-{month:02}-{day:02}"),
    })
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
