use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::db::DbLedgerEntry;
use crate::types::payload::{LedgerPatch, NewLedgerEntry, OwnerQuery};
use crate::{RoutineError, router::RoutineState};

/// GET /api/ledger?user_id=
pub async fn list_entries(
    State(state): State<RoutineState>,
    WithRejection(Query(query), _): WithRejection<Query<OwnerQuery>, RoutineError>,
) -> Result<Json<Vec<DbLedgerEntry>>, RoutineError> {
    let entries = state
        .storage
        .list_ledger_entries(query.user_id.as_deref())
        .await?;
    Ok(Json(entries))
}

/// POST /api/ledger
pub async fn create_entry(
    State(state): State<RoutineState>,
    WithRejection(Json(body), _): WithRejection<Json<NewLedgerEntry>, RoutineError>,
) -> Result<(StatusCode, Json<DbLedgerEntry>), RoutineError> {
    body.validate()?;
    let entry = state.storage.create_ledger_entry(&body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/ledger/{id}
pub async fn get_entry(
    State(state): State<RoutineState>,
    Path(entry_id): Path<String>,
) -> Result<Json<DbLedgerEntry>, RoutineError> {
    Ok(Json(state.storage.get_ledger_entry(&entry_id).await?))
}

/// PATCH /api/ledger/{id}
pub async fn update_entry(
    State(state): State<RoutineState>,
    Path(entry_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<LedgerPatch>, RoutineError>,
) -> Result<Json<DbLedgerEntry>, RoutineError> {
    body.validate()?;
    Ok(Json(
        state.storage.update_ledger_entry(&entry_id, &body).await?,
    ))
}

/// DELETE /api/ledger/{id}
pub async fn delete_entry(
    State(state): State<RoutineState>,
    Path(entry_id): Path<String>,
) -> Result<StatusCode, RoutineError> {
    state.storage.delete_ledger_entry(&entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
