use chrono::{DateTime, Datelike, NaiveDate};

use crate::schedule::policy::MonthOverflow;

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_local_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parses a `YYYY-MM-DD` backend date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if !has_date_shape(trimmed, b'-', [4, 7]) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Parses a date the backend stored, which may carry a time of day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date in the timestamp's own
/// offset) and naive `YYYY-MM-DDTHH:MM:SS` values.
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Some(date) = parse_iso_date(trimmed) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    match trimmed.as_bytes().get(10) {
        Some(b'T' | b' ') => trimmed.get(..10).and_then(parse_iso_date),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalDateError {
    /// Not `DD/MM/YYYY`.
    Shape,
    /// Right shape, but no such day.
    Calendar,
}

/// Parses a `DD/MM/YYYY` form date, telling a bad shape from a bad day.
pub fn parse_local_date_checked(value: &str) -> Result<NaiveDate, LocalDateError> {
    let trimmed = value.trim();
    if !has_date_shape(trimmed, b'/', [2, 5]) {
        return Err(LocalDateError::Shape);
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").map_err(|_| LocalDateError::Calendar)
}

/// Parses a `DD/MM/YYYY` form date.
pub fn parse_local_date(value: &str) -> Option<NaiveDate> {
    parse_local_date_checked(value).ok()
}

/// Day of week with 0 = Sunday through 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or(0)
}

/// Builds `day` inside the month `months` after `date`'s month.
///
/// Days past the end of the month are resolved by `overflow`.
pub fn day_in_month(
    date: NaiveDate,
    months: i32,
    day: u32,
    overflow: MonthOverflow,
) -> Option<NaiveDate> {
    let (year, month) = shift_month(date.year(), date.month(), months);
    let length = days_in_month(year, month);
    match overflow {
        MonthOverflow::Clamp => NaiveDate::from_ymd_opt(year, month, day.clamp(1, length)),
        MonthOverflow::RollOver => {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            first.checked_add_days(chrono::Days::new(u64::from(day.saturating_sub(1))))
        }
    }
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
        _ => 31,
    }
}

fn shift_month(year: i32, month: u32, months: i32) -> (i32, u32) {
    let current_month = i32::try_from(month).unwrap_or(1);
    let mut raw_month = current_month + months;
    let mut year = year;

    while raw_month > 12 {
        raw_month -= 12;
        year += 1;
    }
    while raw_month < 1 {
        raw_month += 12;
        year -= 1;
    }

    (year, u32::try_from(raw_month).unwrap_or(1))
}

fn has_date_shape(value: &str, separator: u8, separator_positions: [usize; 2]) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        if separator_positions.contains(&index) {
            if *byte != separator {
                return false;
            }
        } else if !byte.is_ascii_digit() {
            return false;
        }
    }
    true
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        LocalDateError, day_in_month, format_iso_date, format_local_date, parse_iso_date,
        parse_local_date, parse_local_date_checked, parse_stored_date, weekday_index,
    };
    use crate::schedule::policy::MonthOverflow;

    fn date(value: &str) -> NaiveDate {
        let parsed = parse_iso_date(value);
        assert!(parsed.is_some());
        parsed.unwrap_or(NaiveDate::MIN)
    }

    #[test]
    fn local_dates_require_day_month_year_layout() {
        assert_eq!(parse_local_date("04/03/2024"), Some(date("2024-03-04")));
        assert_eq!(parse_local_date(" 29/02/2024 "), Some(date("2024-02-29")));
        assert_eq!(parse_local_date("2024-03-04"), None);
        assert_eq!(parse_local_date("4/3/2024"), None);
        assert_eq!(parse_local_date("31/02/2024"), None);
        assert_eq!(parse_local_date(""), None);
    }

    #[test]
    fn iso_and_local_formats_round_to_the_same_day() {
        let value = date("2024-12-01");
        assert_eq!(format_iso_date(&value), "2024-12-01");
        assert_eq!(format_local_date(&value), "01/12/2024");
    }

    #[test]
    fn weekday_index_starts_on_sunday() {
        assert_eq!(weekday_index(date("2024-03-03")), 0);
        assert_eq!(weekday_index(date("2024-03-04")), 1);
        assert_eq!(weekday_index(date("2024-03-09")), 6);
    }

    #[test]
    fn day_in_month_applies_overflow_policy() {
        let anchor = date("2024-02-10");
        assert_eq!(
            day_in_month(anchor, 0, 31, MonthOverflow::Clamp),
            Some(date("2024-02-29"))
        );
        assert_eq!(
            day_in_month(anchor, 0, 31, MonthOverflow::RollOver),
            Some(date("2024-03-02"))
        );
        assert_eq!(
            day_in_month(date("2024-12-20"), 1, 5, MonthOverflow::Clamp),
            Some(date("2025-01-05"))
        );
    }

    #[test]
    fn stored_dates_accept_timestamps() {
        assert_eq!(parse_stored_date("2024-03-10"), Some(date("2024-03-10")));
        assert_eq!(
            parse_stored_date("2024-03-10T00:00:00.000Z"),
            Some(date("2024-03-10"))
        );
        assert_eq!(
            parse_stored_date("2024-03-09T22:30:00-03:00"),
            Some(date("2024-03-09"))
        );
        assert_eq!(
            parse_stored_date("2024-03-10T08:00:00"),
            Some(date("2024-03-10"))
        );
        assert_eq!(parse_stored_date("2024-02-30T00:00:00Z"), None);
        assert_eq!(parse_stored_date("10/03/2024"), None);
        assert_eq!(parse_stored_date("2024-03-10Z"), None);
    }

    #[test]
    fn checked_local_dates_report_shape_before_calendar() {
        assert_eq!(parse_local_date_checked("4/3/2024"), Err(LocalDateError::Shape));
        assert_eq!(
            parse_local_date_checked("30/02/2024"),
            Err(LocalDateError::Calendar)
        );
        assert_eq!(parse_local_date_checked("29/02/2024"), Ok(date("2024-02-29")));
    }
}
