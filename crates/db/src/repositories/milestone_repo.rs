//! Repository for the `milestones` table.

use std::collections::HashMap;

use sqlx::PgPool;

use opsdash_core::milestone::DEFAULT_COLOR;
use opsdash_core::types::DbId;

use crate::models::milestone::{CreateMilestone, Milestone, MilestoneWithTodos, UpdateMilestone};
use crate::models::todo::{Todo, TodoTreeNode};
use crate::repositories::todo_repo::{self, TodoRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, date, event_type, color, created_at, updated_at";

/// Provides CRUD operations for milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Insert a new milestone, returning the created row.
    ///
    /// `color` defaults to [`DEFAULT_COLOR`] if absent. Required fields
    /// are validated at the handler layer before this is called.
    pub async fn create(pool: &PgPool, input: &CreateMilestone) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones (title, description, date, event_type, color)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(&input.event_type)
            .bind(input.color.as_deref().unwrap_or(DEFAULT_COLOR))
            .fetch_one(pool)
            .await
    }

    /// List all milestones by date ascending, each with its root todos and
    /// two further levels of children attached (root/child/grandchild,
    /// every level in sibling order).
    pub async fn list_with_todos(pool: &PgPool) -> Result<Vec<MilestoneWithTodos>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones ORDER BY date ASC, id ASC");
        let milestones = sqlx::query_as::<_, Milestone>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = milestones.iter().map(|m| m.id).collect();
        let roots = Self::root_todos(pool, &ids).await?;
        let root_ids: Vec<DbId> = roots.iter().map(|t| t.id).collect();
        let children = TodoRepo::children_of(pool, &root_ids).await?;
        let child_ids: Vec<DbId> = children.iter().map(|t| t.id).collect();
        let grandchildren = TodoRepo::children_of(pool, &child_ids).await?;

        // Group assembled roots back onto their milestones, keeping
        // sibling order within each milestone.
        let mut by_milestone: HashMap<DbId, Vec<TodoTreeNode>> = HashMap::new();
        for node in todo_repo::build_forest(roots, children, grandchildren) {
            if let Some(mid) = node.todo.milestone_id {
                by_milestone.entry(mid).or_default().push(node);
            }
        }

        Ok(milestones
            .into_iter()
            .map(|milestone| MilestoneWithTodos {
                todos: by_milestone.remove(&milestone.id).unwrap_or_default(),
                milestone,
            })
            .collect())
    }

    /// Find a milestone by ID with the same eager todo shape as
    /// [`Self::list_with_todos`]. Returns `None` if absent.
    pub async fn find_with_todos(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MilestoneWithTodos>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1");
        let Some(milestone) = sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let roots = Self::root_todos(pool, &[id]).await?;
        let root_ids: Vec<DbId> = roots.iter().map(|t| t.id).collect();
        let children = TodoRepo::children_of(pool, &root_ids).await?;
        let child_ids: Vec<DbId> = children.iter().map(|t| t.id).collect();
        let grandchildren = TodoRepo::children_of(pool, &child_ids).await?;

        Ok(Some(MilestoneWithTodos {
            milestone,
            todos: todo_repo::build_forest(roots, children, grandchildren),
        }))
    }

    /// Apply a partial update. Only non-absent fields in `input` change;
    /// `description` may be explicitly cleared to NULL.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMilestone,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                date = COALESCE($5, date),
                event_type = COALESCE($6, event_type),
                color = COALESCE($7, color),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.date)
            .bind(&input.event_type)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a milestone by ID. The `milestone_id` foreign key is
    /// `ON DELETE SET NULL`, so referencing todos are detached, never
    /// deleted. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Root todos (`parent_id IS NULL`) of the given milestones, in
    /// sibling order.
    async fn root_todos(pool: &PgPool, milestone_ids: &[DbId]) -> Result<Vec<Todo>, sqlx::Error> {
        if milestone_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {} FROM todos
             WHERE milestone_id = ANY($1) AND parent_id IS NULL
             {}",
            todo_repo::COLUMNS,
            todo_repo::ORDERING,
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(milestone_ids)
            .fetch_all(pool)
            .await
    }
}
