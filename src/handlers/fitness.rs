use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::db::DbFitness;
use crate::types::ActivitySelection;
use crate::types::payload::{FitnessPatch, NewFitnessRecord, OwnerQuery};
use crate::{RoutineError, router::RoutineState};

/// GET /api/fitness?user_id=
pub async fn list_fitness(
    State(state): State<RoutineState>,
    WithRejection(Query(query), _): WithRejection<Query<OwnerQuery>, RoutineError>,
) -> Result<Json<Vec<DbFitness>>, RoutineError> {
    let records = state
        .storage
        .list_fitness(query.user_id.as_deref())
        .await?;
    Ok(Json(records))
}

/// POST /api/fitness
pub async fn create_fitness(
    State(state): State<RoutineState>,
    WithRejection(Json(body), _): WithRejection<Json<NewFitnessRecord>, RoutineError>,
) -> Result<(StatusCode, Json<DbFitness>), RoutineError> {
    body.validate()?;
    let selection = ActivitySelection::parse(body.activities)?;
    let record = state
        .storage
        .create_fitness(body.activity_date, &selection, body.user_id.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /api/fitness/{id}
pub async fn update_fitness(
    State(state): State<RoutineState>,
    Path(fitness_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<FitnessPatch>, RoutineError>,
) -> Result<Json<DbFitness>, RoutineError> {
    let selection = body.activities.map(ActivitySelection::parse).transpose()?;
    let record = state
        .storage
        .update_fitness(&fitness_id, selection.as_ref(), body.user_id.as_deref())
        .await?;
    Ok(Json(record))
}

/// DELETE /api/fitness/{id}
pub async fn delete_fitness(
    State(state): State<RoutineState>,
    Path(fitness_id): Path<String>,
) -> Result<StatusCode, RoutineError> {
    state.storage.delete_fitness(&fitness_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
