//! Item CRUD handlers.
//!
//! Each handler is a thin translation layer: extract the payload, run it
//! through the validator, hand the validated fields to the repository, and
//! map the outcome onto the response contract. No handler talks to the
//! store directly.
//!
//! Write handlers extract the body as a raw JSON value and leave all shape
//! checking to the validator, so type mismatches surface as 400 with the
//! field-violation list instead of an extractor rejection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::models::Item;
use crate::validation::{validate_create, validate_partial};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let fields = validate_create(&payload)?;

    let item = state.repository.create(fields).await?;
    info!(id = item.id, name = %item.name, "item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let items = state.repository.list_all().await?;
    debug!(count = items.len(), "listed items");

    Ok(Json(items))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Item>> {
    let item = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(item))
}

/// PUT /items/{id}: full replacement, both fields required.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Item>> {
    let fields = validate_create(&payload)?;

    let item = state
        .repository
        .update(id, fields)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(id = item.id, "item replaced");

    Ok(Json(item))
}

/// PATCH /items/{id}: any subset of fields; an empty body reads back the
/// current record.
pub async fn patch_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Item>> {
    let patch = validate_partial(&payload)?;

    let item = state
        .repository
        .patch(id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(id = item.id, "item patched");

    Ok(Json(item))
}

/// DELETE /items/{id}: deleting a missing id is a no-op, still 200.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let affected = state.repository.delete(id).await?;
    info!(id, affected, "item delete handled");

    Ok(Json(json!({ "message": "Item removido com sucesso" })))
}
