//! Handlers for the `/todos` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use opsdash_core::error::CoreError;
use opsdash_core::todo::{validate_priority, validate_status};
use opsdash_core::types::DbId;
use opsdash_db::models::todo::{CreateTodo, TodoDetail, UpdateTodo};
use opsdash_db::repositories::TodoRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{reject_empty, require_text};
use crate::query::TodoListParams;
use crate::state::AppState;

/// GET /todos?milestoneId=&status=&parentId=&rootOnly=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TodoListParams>,
) -> AppResult<Json<Vec<TodoDetail>>> {
    let todos = TodoRepo::list(&state.pool, &params.into()).await?;
    Ok(Json(todos))
}

/// GET /todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TodoDetail>> {
    let todo = TodoRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Todo", id }))?;
    Ok(Json(todo))
}

/// POST /todos
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> AppResult<(StatusCode, Json<TodoDetail>)> {
    require_text(&input.title, "title")?;
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if let Some(priority) = &input.priority {
        validate_priority(priority)?;
    }

    let created = TodoRepo::create(&state.pool, &input).await?;
    let detail = TodoRepo::find_detail(&state.pool, created.id)
        .await?
        .ok_or_else(|| AppError::InternalError("created todo no longer exists".to_string()))?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /todos/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodo>,
) -> AppResult<Json<TodoDetail>> {
    reject_empty(&input.title, "title")?;
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if let Some(priority) = &input.priority {
        validate_priority(priority)?;
    }

    let updated = TodoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Todo", id }))?;
    let detail = TodoRepo::find_detail(&state.pool, updated.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Todo", id }))?;
    Ok(Json(detail))
}

/// DELETE /todos/{id}
///
/// Cascades to all descendant todos via the parent foreign key.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = TodoRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Todo", id }))
    }
}
