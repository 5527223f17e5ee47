//! Handlers for the `/milestones` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use opsdash_core::error::CoreError;
use opsdash_core::types::DbId;
use opsdash_db::models::milestone::{
    CreateMilestone, Milestone, MilestoneWithTodos, UpdateMilestone,
};
use opsdash_db::repositories::MilestoneRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{reject_empty, require_text};
use crate::state::AppState;

/// GET /milestones
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MilestoneWithTodos>>> {
    let milestones = MilestoneRepo::list_with_todos(&state.pool).await?;
    Ok(Json(milestones))
}

/// GET /milestones/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MilestoneWithTodos>> {
    let milestone = MilestoneRepo::find_with_todos(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;
    Ok(Json(milestone))
}

/// POST /milestones
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<Milestone>)> {
    if require_text(&input.title, "title").is_err()
        || input.date.is_none()
        || require_text(&input.event_type, "eventType").is_err()
    {
        return Err(CoreError::Validation(
            "title, date, and eventType are required".to_string(),
        )
        .into());
    }

    let milestone = MilestoneRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(milestone)))
}

/// PUT /milestones/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Json<Milestone>> {
    reject_empty(&input.title, "title")?;
    reject_empty(&input.event_type, "eventType")?;

    let milestone = MilestoneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;
    Ok(Json(milestone))
}

/// DELETE /milestones/{id}
///
/// Detaches (does not delete) any todos referencing this milestone.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = MilestoneRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))
    }
}
