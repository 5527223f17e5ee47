//! Repository for the `todos` table.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;

use opsdash_core::todo::STATUS_DONE;
use opsdash_core::types::{DbId, Timestamp};

use crate::models::milestone::Milestone;
use crate::models::todo::{CreateTodo, Todo, TodoDetail, TodoFilter, TodoTreeNode, UpdateTodo};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, title, description, status, priority, deadline, sort_order, \
     milestone_id, parent_id, completed_at, created_at, updated_at";

/// Sibling order, then newest-first as the tie-break.
pub(crate) const ORDERING: &str = "ORDER BY sort_order ASC, created_at DESC";

/// Provides CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo, returning the created row.
    ///
    /// Status defaults to TODO and priority to MEDIUM in SQL. If
    /// `sort_order` is `None` it is computed inside the INSERT as
    /// max sibling order + 1 (siblings: same parent, or for roots the
    /// same milestone), starting at 0, so creation stays one atomic
    /// statement even under concurrent inserts into the same scope.
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos
                (title, description, status, priority, deadline, milestone_id, parent_id, sort_order)
             VALUES ($1, $2, COALESCE($3, 'TODO'), COALESCE($4, 'MEDIUM'), $5, $6, $7,
                COALESCE($8, (
                    SELECT COALESCE(MAX(t.sort_order) + 1, 0) FROM todos t
                    WHERE ($7::bigint IS NOT NULL AND t.parent_id = $7)
                       OR ($7::bigint IS NULL AND t.parent_id IS NULL
                           AND t.milestone_id IS NOT DISTINCT FROM $6))))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.deadline)
            .bind(input.milestone_id)
            .bind(input.parent_id)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a bare todo row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a todo with its milestone, parent, and two levels of children
    /// attached. Returns `None` if no row with the given `id` exists.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<TodoDetail>, sqlx::Error> {
        let Some(todo) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let mut details = Self::attach_relations(pool, vec![todo]).await?;
        Ok(details.pop())
    }

    /// List todos matching `filter`, each with milestone, parent, and two
    /// levels of children attached.
    pub async fn list(pool: &PgPool, filter: &TodoFilter) -> Result<Vec<TodoDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM todos
             WHERE ($1::bigint IS NULL OR milestone_id = $1)
               AND ($2::text IS NULL OR status = $2)
               AND (CASE WHEN $4 THEN parent_id IS NULL
                         ELSE $3::bigint IS NULL OR parent_id = $3 END)
             {ORDERING}"
        );
        let todos = sqlx::query_as::<_, Todo>(&query)
            .bind(filter.milestone_id)
            .bind(&filter.status)
            .bind(filter.parent_id)
            .bind(filter.root_only)
            .fetch_all(pool)
            .await?;
        Self::attach_relations(pool, todos).await
    }

    /// Apply a partial update. Only non-absent fields in `input` change.
    ///
    /// The `completed_at` invariant is derived against the previously
    /// stored status inside a single transaction (row locked with
    /// `FOR UPDATE`) so concurrent status updates cannot interleave:
    /// entering DONE stamps now(), leaving DONE clears it, and an update
    /// that does not supply a status leaves it untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM todos WHERE id = $1 FOR UPDATE");
        let existing = sqlx::query_as::<_, Todo>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let (touch_completed, completed_at): (bool, Option<Timestamp>) = match &input.status {
            Some(new) if new == STATUS_DONE && existing.status != STATUS_DONE => {
                (true, Some(Utc::now()))
            }
            Some(new) if new != STATUS_DONE => (true, None),
            // Status absent, or DONE -> DONE: leave completed_at alone.
            _ => (false, None),
        };

        let query = format!(
            "UPDATE todos SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                status = COALESCE($5, status),
                priority = COALESCE($6, priority),
                deadline = CASE WHEN $7 THEN $8 ELSE deadline END,
                milestone_id = CASE WHEN $9 THEN $10 ELSE milestone_id END,
                parent_id = CASE WHEN $11 THEN $12 ELSE parent_id END,
                sort_order = COALESCE($13, sort_order),
                completed_at = CASE WHEN $14 THEN $15 ELSE completed_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.deadline.is_some())
            .bind(input.deadline.flatten())
            .bind(input.milestone_id.is_some())
            .bind(input.milestone_id.flatten())
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .bind(input.sort_order)
            .bind(touch_completed)
            .bind(completed_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Delete a todo by ID. The `parent_id` foreign key cascades, so all
    /// descendants die with their ancestor. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All direct children of the given todos, in sibling order.
    pub(crate) async fn children_of(
        pool: &PgPool,
        parent_ids: &[DbId],
    ) -> Result<Vec<Todo>, sqlx::Error> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM todos WHERE parent_id = ANY($1) {ORDERING}");
        sqlx::query_as::<_, Todo>(&query)
            .bind(parent_ids)
            .fetch_all(pool)
            .await
    }

    /// Resolve milestone, parent, and two levels of children for a batch
    /// of todos, preserving the input order.
    async fn attach_relations(
        pool: &PgPool,
        todos: Vec<Todo>,
    ) -> Result<Vec<TodoDetail>, sqlx::Error> {
        let ids: Vec<DbId> = todos.iter().map(|t| t.id).collect();
        let children = Self::children_of(pool, &ids).await?;
        let child_ids: Vec<DbId> = children.iter().map(|t| t.id).collect();
        let grandchildren = Self::children_of(pool, &child_ids).await?;

        let milestone_ids: Vec<DbId> = todos.iter().filter_map(|t| t.milestone_id).collect();
        let milestones = fetch_milestones(pool, &milestone_ids).await?;

        let parent_ids: Vec<DbId> = todos.iter().filter_map(|t| t.parent_id).collect();
        let parents = fetch_todos(pool, &parent_ids).await?;

        let mut grouped = group_children(children, grandchildren);

        Ok(todos
            .into_iter()
            .map(|todo| TodoDetail {
                milestone: todo.milestone_id.and_then(|id| milestones.get(&id).cloned()),
                parent: todo.parent_id.and_then(|id| parents.get(&id).cloned()),
                children: grouped.remove(&todo.id).unwrap_or_default(),
                todo,
            })
            .collect())
    }
}

/// Nest `grandchildren` under `children` and group the resulting nodes by
/// parent ID, preserving each level's query order. Grandchildren become
/// leaf nodes; anything deeper than three levels is never assembled.
pub fn group_children(
    children: Vec<Todo>,
    grandchildren: Vec<Todo>,
) -> HashMap<DbId, Vec<TodoTreeNode>> {
    let mut grandkids: HashMap<DbId, Vec<Todo>> = HashMap::new();
    for gc in grandchildren {
        if let Some(pid) = gc.parent_id {
            grandkids.entry(pid).or_default().push(gc);
        }
    }

    let mut by_parent: HashMap<DbId, Vec<TodoTreeNode>> = HashMap::new();
    for child in children {
        let Some(pid) = child.parent_id else { continue };
        let kids = grandkids
            .remove(&child.id)
            .unwrap_or_default()
            .into_iter()
            .map(|todo| TodoTreeNode {
                todo,
                children: Vec::new(),
            })
            .collect();
        by_parent.entry(pid).or_default().push(TodoTreeNode {
            todo: child,
            children: kids,
        });
    }
    by_parent
}

/// Attach grouped child nodes to their roots, preserving root order.
pub fn build_forest(roots: Vec<Todo>, children: Vec<Todo>, grandchildren: Vec<Todo>) -> Vec<TodoTreeNode> {
    let mut grouped = group_children(children, grandchildren);
    roots
        .into_iter()
        .map(|root| TodoTreeNode {
            children: grouped.remove(&root.id).unwrap_or_default(),
            todo: root,
        })
        .collect()
}

async fn fetch_milestones(
    pool: &PgPool,
    ids: &[DbId],
) -> Result<HashMap<DbId, Milestone>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = sqlx::query_as::<_, Milestone>(
        "SELECT id, title, description, date, event_type, color, created_at, updated_at
         FROM milestones WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|m| (m.id, m)).collect())
}

async fn fetch_todos(pool: &PgPool, ids: &[DbId]) -> Result<HashMap<DbId, Todo>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let query = format!("SELECT {COLUMNS} FROM todos WHERE id = ANY($1)");
    let rows = sqlx::query_as::<_, Todo>(&query)
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|t| (t.id, t)).collect())
}
