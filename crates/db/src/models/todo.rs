//! Todo entity model, response shapes, and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use opsdash_core::types::{DbId, Timestamp};

use crate::models::milestone::Milestone;
use crate::models::patch;

/// A todo row from the `todos` table.
///
/// `sort_order` is serialized as `order` to match the wire contract.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub deadline: Option<NaiveDate>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub milestone_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    /// Non-null iff `status` is currently DONE.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A todo with nested children, for the milestone aggregate. The store
/// never nests deeper than root/child/grandchild regardless of how deep
/// persisted parent chains go.
#[derive(Debug, Serialize)]
pub struct TodoTreeNode {
    #[serde(flatten)]
    pub todo: Todo,
    pub children: Vec<TodoTreeNode>,
}

/// A todo with its resolved milestone, parent, and up to two levels of
/// children. Response shape for todo list/get/create/update.
#[derive(Debug, Serialize)]
pub struct TodoDetail {
    #[serde(flatten)]
    pub todo: Todo,
    pub milestone: Option<Milestone>,
    pub parent: Option<Todo>,
    pub children: Vec<TodoTreeNode>,
}

/// DTO for creating a todo. Only `title` is required; status and priority
/// default in SQL, `order` defaults to max sibling order + 1.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub milestone_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

/// DTO for partially updating a todo. Only supplied fields change;
/// `description`, `deadline`, `milestoneId`, and `parentId` may be
/// explicitly cleared with `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "patch::explicit_null")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "patch::explicit_null")]
    pub deadline: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "patch::explicit_null")]
    pub milestone_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "patch::explicit_null")]
    pub parent_id: Option<Option<DbId>>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

/// Filter for listing todos. Filters combine conjunctively; `root_only`
/// forces `parent_id IS NULL` and overrides any explicit `parent_id`.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub milestone_id: Option<DbId>,
    pub status: Option<String>,
    pub parent_id: Option<DbId>,
    pub root_only: bool,
}
