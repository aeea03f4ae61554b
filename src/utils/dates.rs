use crate::utils::constants::DATE_FORMAT;
use chrono::{Datelike, Days, NaiveDate};

/// Parse a day-first `DD/MM/YYYY` date
///
/// # Examples
/// ```
/// use climate_explorer::utils::parse_day_first;
///
/// let date = parse_day_first("05/01/2020").unwrap();
/// assert_eq!(date.to_string(), "2020-01-05");
/// ```
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !has_day_first_shape(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Exactly `DD/MM/YYYY`: chrono alone accepts short fields and signed years
fn has_day_first_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = Days::new(u64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_days(offset).unwrap_or(date)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the calendar quarter containing `date`
pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let first_month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), first_month, 1).unwrap_or(date)
}

pub fn year_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}
