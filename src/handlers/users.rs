use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::db::DbUser;
use crate::types::payload::{NewUser, UserPatch};
use crate::{RoutineError, router::RoutineState};

/// GET /api/users
pub async fn list_users(
    State(state): State<RoutineState>,
) -> Result<Json<Vec<DbUser>>, RoutineError> {
    Ok(Json(state.storage.list_users().await?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<RoutineState>,
    WithRejection(Json(body), _): WithRejection<Json<NewUser>, RoutineError>,
) -> Result<(StatusCode, Json<DbUser>), RoutineError> {
    body.validate()?;
    let user = state.storage.create_user(&body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<RoutineState>,
    Path(user_id): Path<String>,
) -> Result<Json<DbUser>, RoutineError> {
    Ok(Json(state.storage.get_user(&user_id).await?))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<RoutineState>,
    Path(user_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<UserPatch>, RoutineError>,
) -> Result<Json<DbUser>, RoutineError> {
    Ok(Json(state.storage.update_user(&user_id, &body).await?))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<RoutineState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, RoutineError> {
    state.storage.delete_user(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
