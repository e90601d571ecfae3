//! Calendar window arithmetic for aggregation queries.
//!
//! All aggregation windows are inclusive `[start, end]` ranges where the
//! start is the first instant of a day (00:00:00) and the end is the last
//! instant (23:59:59). Months and days are local calendar units in UTC.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// English name of a 1-based calendar month.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// Abbreviated name of a 1-based calendar month.
pub fn month_abbrev(month: u32) -> &'static str {
    MONTH_ABBREVS
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// Display label like "March 2024".
pub fn month_label(year: i32, month: u32) -> String {
    format!("{} {year}", month_name(month))
}

/// Compact label like "Mar 2024", used by the trend series.
pub fn short_month_label(year: i32, month: u32) -> String {
    format!("{} {year}", month_abbrev(month))
}

/// Number of days in a calendar month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // Last day of the month = day before the first of the next month.
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some(last.day())
}

/// First instant of a calendar day, in UTC.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last instant (23:59:59) of a calendar day, in UTC.
pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(date.and_hms_opt(23, 59, 59)?.and_utc())
}

/// Inclusive window spanning one calendar month: first instant of day 1
/// through the last instant of the final day.
pub fn month_window(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?;
    Some((start_of_day(first), end_of_day(last)?))
}

/// Inclusive window spanning one calendar year (Jan 1 through Dec 31).
pub fn year_window(year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some((start_of_day(first), end_of_day(last)?))
}

/// The current calendar month as `(year, month)`, from the UTC clock.
pub fn current_month() -> (i32, u32) {
    let now = Utc::now();
    (now.year(), now.month())
}

/// The `count` consecutive calendar months ending at `(end_year, end_month)`,
/// in chronological order. Always exactly `count` entries.
pub fn trailing_months(end_year: i32, end_month: u32, count: u32) -> Vec<(i32, u32)> {
    let mut months = Vec::with_capacity(count as usize);
    let mut year = end_year;
    let mut month = end_month;
    for _ in 0..count {
        months.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    months.reverse();
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), Some(31));
        assert_eq!(days_in_month(2024, 2), Some(29)); // leap year
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, 0), None);
    }

    #[test]
    fn test_month_window_boundaries() {
        let (start, end) = month_window(2024, 3).expect("valid month");
        assert_eq!(start.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-03-31T23:59:59+00:00");
    }

    #[test]
    fn test_month_window_february_leap() {
        let (_, end) = month_window(2024, 2).expect("valid month");
        assert_eq!(end.day(), 29);
        assert_eq!(end.hour(), 23);
        assert_eq!(end.second(), 59);
    }

    #[test]
    fn test_month_window_invalid_month() {
        assert!(month_window(2024, 0).is_none());
        assert!(month_window(2024, 13).is_none());
    }

    #[test]
    fn test_year_window_boundaries() {
        let (start, end) = year_window(2024).expect("valid year");
        assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-12-31T23:59:59+00:00");
    }

    #[test]
    fn test_trailing_months_within_year() {
        let months = trailing_months(2024, 6, 3);
        assert_eq!(months, vec![(2024, 4), (2024, 5), (2024, 6)]);
    }

    #[test]
    fn test_trailing_months_across_year_boundary() {
        let months = trailing_months(2024, 2, 6);
        assert_eq!(
            months,
            vec![
                (2023, 9),
                (2023, 10),
                (2023, 11),
                (2023, 12),
                (2024, 1),
                (2024, 2)
            ]
        );
    }

    #[test]
    fn test_trailing_months_always_exact_count() {
        for count in 1..=24 {
            assert_eq!(trailing_months(2024, 7, count).len(), count as usize);
        }
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label(2024, 3), "March 2024");
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
        assert_eq!(month_name(0), "Unknown");
    }

    #[test]
    fn test_short_month_labels() {
        assert_eq!(short_month_label(2024, 3), "Mar 2024");
        assert_eq!(month_abbrev(1), "Jan");
        assert_eq!(month_abbrev(12), "Dec");
        assert_eq!(month_abbrev(13), "Unknown");
    }

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(start_of_day(date).to_rfc3339(), "2024-03-05T00:00:00+00:00");
        assert_eq!(
            end_of_day(date).unwrap().to_rfc3339(),
            "2024-03-05T23:59:59+00:00"
        );
    }
}
