//! Shared query parameter types for API handlers.

use serde::Deserialize;

use opsdash_core::types::DbId;
use opsdash_db::models::todo::TodoFilter;

/// Query parameters for `GET /todos`
/// (`?milestoneId=&status=&parentId=&rootOnly=`).
///
/// `rootOnly=true` forces the root-level filter (`parentId IS NULL`) and
/// overrides any explicit `parentId`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListParams {
    pub milestone_id: Option<DbId>,
    pub status: Option<String>,
    pub parent_id: Option<DbId>,
    #[serde(default)]
    pub root_only: bool,
}

impl From<TodoListParams> for TodoFilter {
    fn from(params: TodoListParams) -> Self {
        TodoFilter {
            milestone_id: params.milestone_id,
            status: params.status,
            parent_id: params.parent_id,
            root_only: params.root_only,
        }
    }
}
