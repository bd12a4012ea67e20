//! Period statistics for the ledger and fitness dashboards.
//!
//! Every ratio here is guarded: a zero denominator yields zero, never NaN or a
//! division error.

use crate::db::models::{DbFitness, DbLedgerEntry};
use crate::error::RoutineError;
use crate::service::classifier::LedgerClassifier;
use crate::types::{Activity, Period};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Minutes credited per activity tag in the daily trend.
pub const MINUTES_PER_ACTIVITY: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    /// expense / income, rounded to 4 places; zero without income.
    pub expense_ratio: Decimal,
    pub entry_count: usize,
}

pub fn summarize_ledger<'a, I, C>(
    entries: I,
    classifier: &C,
) -> Result<LedgerSummary, RoutineError>
where
    I: IntoIterator<Item = &'a DbLedgerEntry>,
    C: LedgerClassifier + ?Sized,
{
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut entry_count = 0;
    for entry in entries {
        if classifier.is_income(&entry.category_id) {
            income = income
                .checked_add(entry.net())
                .ok_or(RoutineError::Overflow("ledger income"))?;
        } else {
            expense = expense
                .checked_add(entry.net())
                .ok_or(RoutineError::Overflow("ledger expense"))?;
        }
        entry_count += 1;
    }
    let balance = income
        .checked_sub(expense)
        .ok_or(RoutineError::Overflow("ledger balance"))?;
    Ok(LedgerSummary {
        income,
        expense,
        balance,
        expense_ratio: expense_ratio(expense, income),
        entry_count,
    })
}

pub fn expense_ratio(expense: Decimal, income: Decimal) -> Decimal {
    if income.is_zero() {
        return Decimal::ZERO;
    }
    expense
        .checked_div(income)
        .map(|r| r.round_dp(4))
        .unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyMinutes {
    pub date: NaiveDate,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitnessSummary {
    pub trained_days: usize,
    pub total_days: i64,
    /// trained_days / total_days; zero when the period has not started.
    pub frequency: f64,
    pub total_activities: usize,
    pub activity_counts: BTreeMap<Activity, usize>,
    /// Sum of `daily_minutes`.
    pub total_minutes: u32,
    pub daily_minutes: Vec<DailyMinutes>,
}

/// Distinct dates carrying a trained record.
pub fn trained_days<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a DbFitness>,
{
    records
        .into_iter()
        .filter(|r| r.trained)
        .map(|r| r.activity_date)
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn training_frequency(trained_days: usize, total_days: i64) -> f64 {
    if total_days <= 0 {
        return 0.0;
    }
    trained_days as f64 / total_days as f64
}

/// Summarize the records of one user in `period`, as seen on `today`.
pub fn summarize_fitness<'a, I>(records: I, period: Period, today: NaiveDate) -> FitnessSummary
where
    I: IntoIterator<Item = &'a DbFitness>,
{
    let records: Vec<&DbFitness> = records.into_iter().collect();

    let mut activity_counts: BTreeMap<Activity, usize> = BTreeMap::new();
    for record in records.iter().filter(|r| r.trained) {
        for activity in &record.activities {
            *activity_counts.entry(*activity).or_default() += 1;
        }
    }
    let total_activities: usize = activity_counts.values().sum();

    let mut minutes_by_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for record in &records {
        *minutes_by_day.entry(record.activity_date).or_default() +=
            record.activities.len() as u32 * MINUTES_PER_ACTIVITY;
    }
    let total_minutes = minutes_by_day.values().sum();
    let daily_minutes = minutes_by_day
        .into_iter()
        .map(|(date, minutes)| DailyMinutes { date, minutes })
        .collect();

    let trained_days = trained_days(records.iter().copied());
    let total_days = period.span_days(today);

    FitnessSummary {
        trained_days,
        total_days,
        frequency: training_frequency(trained_days, total_days),
        total_activities,
        activity_counts,
        total_minutes,
        daily_minutes,
    }
}
