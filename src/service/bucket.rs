//! Grouping of dated, user-owned records into calendar periods.

use crate::db::models::{DbFitness, DbLedgerEntry};
use crate::service::classifier::LedgerClassifier;
use crate::types::{Granularity, Period};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A record that can be placed in a calendar period and attributed to a user.
pub trait Dated {
    /// Date used for bucketing.
    fn bucket_date(&self) -> NaiveDate;
    fn owner(&self) -> Option<&str>;
}

impl Dated for DbFitness {
    fn bucket_date(&self) -> NaiveDate {
        self.activity_date
    }

    fn owner(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// Ledger entry paired with its salary-normalized date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedEntry {
    #[serde(flatten)]
    pub entry: DbLedgerEntry,
    pub effective_date: NaiveDate,
}

impl Dated for NormalizedEntry {
    fn bucket_date(&self) -> NaiveDate {
        self.effective_date
    }

    fn owner(&self) -> Option<&str> {
        self.entry.user_id.as_deref()
    }
}

pub fn normalize_entries<C>(entries: Vec<DbLedgerEntry>, classifier: &C) -> Vec<NormalizedEntry>
where
    C: LedgerClassifier + ?Sized,
{
    entries
        .into_iter()
        .map(|entry| NormalizedEntry {
            effective_date: entry.effective_date(classifier),
            entry,
        })
        .collect()
}

pub fn for_user<'a, T, I>(records: I, user_id: &str) -> Vec<&'a T>
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|r| r.owner() == Some(user_id))
        .collect()
}

pub fn in_period<'a, T, I>(records: I, period: Period) -> Vec<&'a T>
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|r| period.contains(r.bucket_date()))
        .collect()
}

/// Partition records by period, oldest period first. Records keep their
/// input order inside a bucket.
pub fn bucket<'a, T, I>(records: I, granularity: Granularity) -> BTreeMap<Period, Vec<&'a T>>
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut buckets: BTreeMap<Period, Vec<&'a T>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(Period::containing(record.bucket_date(), granularity))
            .or_default()
            .push(record);
    }
    buckets
}

/// Distinct periods present in `records`, newest first.
pub fn available_periods<'a, T, I>(records: I, granularity: Granularity) -> Vec<Period>
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let periods: BTreeSet<Period> = records
        .into_iter()
        .map(|r| Period::containing(r.bucket_date(), granularity))
        .collect();
    periods.into_iter().rev().collect()
}
