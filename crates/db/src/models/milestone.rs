//! Milestone entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use opsdash_core::types::{DbId, Timestamp};

use crate::models::patch;
use crate::models::todo::TodoTreeNode;

/// A milestone row from the `milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub event_type: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A milestone with its root todos and two further levels of children
/// eagerly attached. Response shape for milestone list/get.
#[derive(Debug, Serialize)]
pub struct MilestoneWithTodos {
    #[serde(flatten)]
    pub milestone: Milestone,
    pub todos: Vec<TodoTreeNode>,
}

/// DTO for creating a milestone.
///
/// Required fields are `Option` so the handler can report a
/// ValidationError (400) instead of a body-rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilestone {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub event_type: Option<String>,
    /// Defaults to [`opsdash_core::milestone::DEFAULT_COLOR`] if omitted.
    pub color: Option<String>,
}

/// DTO for partially updating a milestone. Only supplied fields change;
/// `description` may be explicitly cleared with `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestone {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "patch::explicit_null")]
    pub description: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub event_type: Option<String>,
    pub color: Option<String>,
}
