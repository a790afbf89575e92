//! Calendar arithmetic for monthly dues periods.
//!
//! The allocator advances strictly month-by-month; all month math lives here
//! so year rollover and month lengths are handled in one place.

use chrono::{Datelike, NaiveDate};

/// The (year, month) period a date is credited to.
pub fn period(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// The month after the given one, rolling the year over after December.
pub fn next_month(month: u32, year: i32) -> (u32, i32) {
    if month == 12 {
        (1, year + 1)
    } else {
        (month + 1, year)
    }
}

/// First day of the calendar month after the given date.
///
/// Safe across year boundaries and month lengths: the 31st of a long month
/// still advances to the 1st of the next month.
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (month, year) = next_month(date.month(), date.year());
    // Day 1 exists in every month
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}
