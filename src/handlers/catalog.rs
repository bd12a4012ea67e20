use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::db::{DbCategory, DbItem};
use crate::types::payload::{CategoryPatch, ItemPatch, NewCategory, NewItem};
use crate::{RoutineError, router::RoutineState};

/// GET /api/categories
pub async fn list_categories(
    State(state): State<RoutineState>,
) -> Result<Json<Vec<DbCategory>>, RoutineError> {
    Ok(Json(state.storage.list_categories().await?))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<RoutineState>,
    WithRejection(Json(body), _): WithRejection<Json<NewCategory>, RoutineError>,
) -> Result<(StatusCode, Json<DbCategory>), RoutineError> {
    body.validate()?;
    let category = state.storage.create_category(&body).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<RoutineState>,
    Path(category_id): Path<String>,
) -> Result<Json<DbCategory>, RoutineError> {
    Ok(Json(state.storage.get_category(&category_id).await?))
}

/// PATCH /api/categories/{id}
pub async fn update_category(
    State(state): State<RoutineState>,
    Path(category_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<CategoryPatch>, RoutineError>,
) -> Result<Json<DbCategory>, RoutineError> {
    body.validate()?;
    Ok(Json(
        state.storage.update_category(&category_id, &body).await?,
    ))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<RoutineState>,
    Path(category_id): Path<String>,
) -> Result<StatusCode, RoutineError> {
    state.storage.delete_category(&category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/categories/{id}/items
pub async fn list_category_items(
    State(state): State<RoutineState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<DbItem>>, RoutineError> {
    Ok(Json(
        state.storage.list_items_by_category(&category_id).await?,
    ))
}

/// GET /api/items
pub async fn list_items(
    State(state): State<RoutineState>,
) -> Result<Json<Vec<DbItem>>, RoutineError> {
    Ok(Json(state.storage.list_items().await?))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<RoutineState>,
    WithRejection(Json(body), _): WithRejection<Json<NewItem>, RoutineError>,
) -> Result<(StatusCode, Json<DbItem>), RoutineError> {
    body.validate()?;
    let item = state.storage.create_item(&body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/items/{id}
pub async fn update_item(
    State(state): State<RoutineState>,
    Path(item_id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<ItemPatch>, RoutineError>,
) -> Result<Json<DbItem>, RoutineError> {
    body.validate()?;
    Ok(Json(state.storage.update_item(&item_id, &body).await?))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<RoutineState>,
    Path(item_id): Path<String>,
) -> Result<StatusCode, RoutineError> {
    state.storage.delete_item(&item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
