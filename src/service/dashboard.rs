use crate::db::models::DbFitness;
use crate::db::sqlite::RoutineStorage;
use crate::error::RoutineError;
use crate::service::aggregate::{self, FitnessSummary, LedgerSummary};
use crate::service::bucket::{self, NormalizedEntry};
use crate::service::classifier::LedgerClassifier;
use crate::types::{Granularity, Period};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::debug;

/// Fitness statistics for one user and period, plus the rows behind them.
#[derive(Debug, Clone, Serialize)]
pub struct FitnessReport {
    pub user_id: String,
    pub period: Period,
    pub summary: FitnessSummary,
    pub records: Vec<DbFitness>,
}

/// Ledger totals for one user and period, plus the rows behind them.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    pub user_id: String,
    pub period: Period,
    pub summary: LedgerSummary,
    pub entries: Vec<NormalizedEntry>,
}

/// Per-request statistics: each call queries the store afresh and feeds the
/// rows through normalization, bucketing and aggregation.
#[derive(Clone)]
pub struct Dashboard {
    storage: RoutineStorage,
    classifier: Arc<dyn LedgerClassifier>,
}

impl Dashboard {
    pub fn new(storage: RoutineStorage, classifier: Arc<dyn LedgerClassifier>) -> Self {
        Self {
            storage,
            classifier,
        }
    }

    pub async fn fitness_report(
        &self,
        user_id: &str,
        period: Period,
        today: NaiveDate,
    ) -> Result<FitnessReport, RoutineError> {
        self.storage.get_user(user_id).await?;
        let all = self.storage.list_fitness(None).await?;
        let selected = bucket::in_period(bucket::for_user(&all, user_id), period);
        let summary = aggregate::summarize_fitness(selected.iter().copied(), period, today);

        debug!(
            user_id,
            period = %period,
            records = selected.len(),
            trained_days = summary.trained_days,
            "fitness report computed"
        );
        Ok(FitnessReport {
            user_id: user_id.to_string(),
            period,
            summary,
            records: selected.into_iter().cloned().collect(),
        })
    }

    /// Periods with at least one fitness record for the user, newest first.
    pub async fn fitness_periods(
        &self,
        user_id: &str,
        granularity: Granularity,
    ) -> Result<Vec<Period>, RoutineError> {
        self.storage.get_user(user_id).await?;
        let all = self.storage.list_fitness(None).await?;
        Ok(bucket::available_periods(
            bucket::for_user(&all, user_id),
            granularity,
        ))
    }

    pub async fn ledger_report(
        &self,
        user_id: &str,
        period: Period,
    ) -> Result<LedgerReport, RoutineError> {
        self.storage.get_user(user_id).await?;
        let normalized = self.normalized_entries().await?;
        let mut selected = bucket::in_period(bucket::for_user(&normalized, user_id), period);
        selected.sort_by_key(|n| Reverse(n.effective_date));
        let summary =
            aggregate::summarize_ledger(selected.iter().map(|n| &n.entry), &*self.classifier)?;

        debug!(
            user_id,
            period = %period,
            entries = summary.entry_count,
            income = %summary.income,
            expense = %summary.expense,
            "ledger report computed"
        );
        Ok(LedgerReport {
            user_id: user_id.to_string(),
            period,
            summary,
            entries: selected.into_iter().cloned().collect(),
        })
    }

    /// Periods with at least one ledger entry for the user (by effective
    /// date), newest first.
    pub async fn ledger_periods(
        &self,
        user_id: &str,
        granularity: Granularity,
    ) -> Result<Vec<Period>, RoutineError> {
        self.storage.get_user(user_id).await?;
        let normalized = self.normalized_entries().await?;
        Ok(bucket::available_periods(
            bucket::for_user(&normalized, user_id),
            granularity,
        ))
    }

    async fn normalized_entries(&self) -> Result<Vec<NormalizedEntry>, RoutineError> {
        let entries = self.storage.list_ledger_entries(None).await?;
        Ok(bucket::normalize_entries(entries, &*self.classifier))
    }
}
