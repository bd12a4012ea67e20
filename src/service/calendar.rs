//! Calendar arithmetic shared by salary normalization, bucketing and
//! fitness day-spans.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Earliest year accepted from clients.
pub const MIN_YEAR: i32 = 1;
/// Latest year accepted from clients.
pub const MAX_YEAR: i32 = 9999;

pub fn is_supported_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// First day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// January 1st of `date`'s year.
pub fn year_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.ordinal0()))
}

/// Last day of the month before `date`'s month (first-of-month minus one day).
pub fn last_day_of_previous_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day()))
}

/// Last day of the period of `months` length starting at `start`, or `None`
/// when it falls past the end of chrono's calendar.
pub fn period_end(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(months))?.pred_opt()
}

/// Days from `start` through `end`, both inclusive.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Day-span of `[start, end]` as seen on `today`: counted through `today` while
/// the range is in progress, in full for any other range.
pub fn span_days(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> i64 {
    if start <= today && today <= end {
        inclusive_days(start, today)
    } else {
        inclusive_days(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn previous_month_end_handles_leap_and_year_rollover() {
        assert_eq!(last_day_of_previous_month(d(2024, 3, 15)), d(2024, 2, 29));
        assert_eq!(last_day_of_previous_month(d(2023, 3, 1)), d(2023, 2, 28));
        assert_eq!(last_day_of_previous_month(d(2024, 1, 10)), d(2023, 12, 31));
        assert_eq!(last_day_of_previous_month(d(2024, 5, 20)), d(2024, 4, 30));
    }

    #[test]
    fn starts_and_ends() {
        assert_eq!(month_start(d(2024, 2, 29)), d(2024, 2, 1));
        assert_eq!(year_start(d(2024, 12, 31)), d(2024, 1, 1));
        assert_eq!(period_end(d(2024, 2, 1), 1), Some(d(2024, 2, 29)));
        assert_eq!(period_end(d(2023, 1, 1), 12), Some(d(2023, 12, 31)));
    }

    #[test]
    fn period_end_past_calendar_limit_is_none() {
        let last_year = NaiveDate::MAX.year();
        assert_eq!(period_end(d(last_year, 1, 1), 12), None);
        assert_eq!(period_end(d(last_year, 12, 1), 1), None);
        assert_eq!(period_end(d(last_year, 11, 1), 1), Some(d(last_year, 11, 30)));
        assert!(!is_supported_year(last_year));
        assert!(is_supported_year(2024));
        assert!(!is_supported_year(0));
    }

    #[test]
    fn span_is_to_date_only_for_current_range() {
        let start = d(2024, 3, 1);
        let end = d(2024, 3, 31);
        assert_eq!(span_days(start, end, d(2024, 3, 10)), 10);
        assert_eq!(span_days(start, end, d(2024, 3, 1)), 1);
        assert_eq!(span_days(start, end, d(2024, 3, 31)), 31);
        assert_eq!(span_days(start, end, d(2024, 4, 2)), 31);
        assert_eq!(span_days(start, end, d(2024, 2, 28)), 31);
    }

    #[test]
    fn leap_year_span() {
        assert_eq!(inclusive_days(d(2024, 1, 1), d(2024, 12, 31)), 366);
        assert_eq!(inclusive_days(d(2023, 1, 1), d(2023, 12, 31)), 365);
    }
}
