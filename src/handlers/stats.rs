use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;
use chrono::Local;

use crate::service::dashboard::{FitnessReport, LedgerReport};
use crate::types::Period;
use crate::types::payload::{PeriodsQuery, StatsQuery};
use crate::{RoutineError, router::RoutineState};

/// GET /api/stats/fitness?user_id=&year=[&month=]
pub async fn fitness_stats(
    State(state): State<RoutineState>,
    WithRejection(Query(query), _): WithRejection<Query<StatsQuery>, RoutineError>,
) -> Result<Json<FitnessReport>, RoutineError> {
    let period = query.period()?;
    let today = Local::now().date_naive();
    let report = state
        .dashboard
        .fitness_report(&query.user_id, period, today)
        .await?;
    Ok(Json(report))
}

/// GET /api/stats/fitness/periods?user_id=&granularity=
pub async fn fitness_periods(
    State(state): State<RoutineState>,
    WithRejection(Query(query), _): WithRejection<Query<PeriodsQuery>, RoutineError>,
) -> Result<Json<Vec<Period>>, RoutineError> {
    let periods = state
        .dashboard
        .fitness_periods(&query.user_id, query.granularity)
        .await?;
    Ok(Json(periods))
}

/// GET /api/stats/ledger?user_id=&year=[&month=]
pub async fn ledger_stats(
    State(state): State<RoutineState>,
    WithRejection(Query(query), _): WithRejection<Query<StatsQuery>, RoutineError>,
) -> Result<Json<LedgerReport>, RoutineError> {
    let period = query.period()?;
    let report = state
        .dashboard
        .ledger_report(&query.user_id, period)
        .await?;
    Ok(Json(report))
}

/// GET /api/stats/ledger/periods?user_id=&granularity=
pub async fn ledger_periods(
    State(state): State<RoutineState>,
    WithRejection(Query(query), _): WithRejection<Query<PeriodsQuery>, RoutineError>,
) -> Result<Json<Vec<Period>>, RoutineError> {
    let periods = state
        .dashboard
        .ledger_periods(&query.user_id, query.granularity)
        .await?;
    Ok(Json(periods))
}
