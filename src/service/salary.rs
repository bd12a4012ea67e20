//! Salary date normalization.
//!
//! Payroll paid early in a month is earned in the month before it. When an
//! entry's item is the salary marker and its day-of-month is at or below the
//! cutoff, its effective date becomes the last day of the previous month. The
//! stored date is never touched; this is a view used by bucketing only.

use crate::db::models::DbLedgerEntry;
use crate::service::calendar;
use crate::service::classifier::LedgerClassifier;
use chrono::{Datelike, NaiveDate};

pub fn effective_date<C>(date: NaiveDate, item_id: &str, classifier: &C) -> NaiveDate
where
    C: LedgerClassifier + ?Sized,
{
    if classifier.is_salary(item_id) && date.day() <= classifier.salary_cutoff_day() {
        calendar::last_day_of_previous_month(date)
    } else {
        date
    }
}

impl DbLedgerEntry {
    pub fn effective_date<C>(&self, classifier: &C) -> NaiveDate
    where
        C: LedgerClassifier + ?Sized,
    {
        effective_date(self.date, &self.item_id, classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerMarkers;
    use crate::service::classifier::MarkerClassifier;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn classifier() -> MarkerClassifier {
        MarkerClassifier::new(LedgerMarkers::default())
    }

    #[test]
    fn early_salary_moves_to_previous_month_end() {
        let c = classifier();
        assert_eq!(effective_date(d(2024, 3, 15), "salary", &c), d(2024, 2, 29));
        assert_eq!(effective_date(d(2024, 3, 20), "salary", &c), d(2024, 2, 29));
        assert_eq!(effective_date(d(2024, 1, 1), "salary", &c), d(2023, 12, 31));
        assert_eq!(effective_date(d(2024, 1, 10), "salary", &c), d(2023, 12, 31));
    }

    #[test]
    fn late_salary_is_unchanged() {
        let c = classifier();
        assert_eq!(effective_date(d(2024, 3, 21), "salary", &c), d(2024, 3, 21));
        assert_eq!(effective_date(d(2024, 3, 31), "salary", &c), d(2024, 3, 31));
    }

    #[test]
    fn other_items_are_never_shifted() {
        let c = classifier();
        for day in 1..=31 {
            let date = d(2024, 1, day);
            assert_eq!(effective_date(date, "groceries", &c), date);
        }
    }

    #[test]
    fn every_early_day_lands_on_the_same_month_end() {
        let c = classifier();
        for day in 1..=20 {
            assert_eq!(
                effective_date(d(2023, 5, day), "salary", &c),
                d(2023, 4, 30)
            );
        }
    }

    #[test]
    fn cutoff_is_configurable() {
        let c = MarkerClassifier::new(LedgerMarkers {
            salary_cutoff_day: 5,
            ..LedgerMarkers::default()
        });
        assert_eq!(effective_date(d(2024, 7, 5), "salary", &c), d(2024, 6, 30));
        assert_eq!(effective_date(d(2024, 7, 6), "salary", &c), d(2024, 7, 6));
    }
}
