//! Integration tests for milestone and todo CRUD against a real database:
//! - Create defaults (color, status, priority, sibling order)
//! - Partial updates, including explicit-null clears
//! - The completed_at/DONE invariant across status transitions
//! - Detach-on-milestone-delete vs cascade-on-todo-delete

use chrono::NaiveDate;
use sqlx::PgPool;

use opsdash_core::todo::{PRIORITY_MEDIUM, STATUS_DONE, STATUS_IN_PROGRESS, STATUS_TODO};
use opsdash_db::models::milestone::{CreateMilestone, UpdateMilestone};
use opsdash_db::models::todo::{CreateTodo, UpdateTodo};
use opsdash_db::repositories::{MilestoneRepo, TodoRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn new_milestone(title: &str, on: &str) -> CreateMilestone {
    CreateMilestone {
        title: Some(title.to_string()),
        date: Some(date(on)),
        event_type: Some("demo-day".to_string()),
        ..Default::default()
    }
}

fn new_todo(title: &str) -> CreateTodo {
    CreateTodo {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Milestone CRUD
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_milestone_defaults_color(pool: PgPool) {
    let milestone = MilestoneRepo::create(&pool, &new_milestone("Demo Day", "2026-08-01"))
        .await
        .unwrap();

    assert_eq!(milestone.title, "Demo Day");
    assert_eq!(milestone.color, "#14b8a6");
    assert_eq!(milestone.event_type, "demo-day");
    assert!(milestone.description.is_none());
}

#[sqlx::test]
async fn create_milestone_keeps_explicit_color(pool: PgPool) {
    let input = CreateMilestone {
        color: Some("#ff0000".to_string()),
        ..new_milestone("OT", "2026-03-09")
    };
    let milestone = MilestoneRepo::create(&pool, &input).await.unwrap();
    assert_eq!(milestone.color, "#ff0000");
}

#[sqlx::test]
async fn update_milestone_changes_only_supplied_fields(pool: PgPool) {
    let created = MilestoneRepo::create(
        &pool,
        &CreateMilestone {
            description: Some("original".to_string()),
            ..new_milestone("MT", "2026-03-14")
        },
    )
    .await
    .unwrap();

    let updated = MilestoneRepo::update(
        &pool,
        created.id,
        &UpdateMilestone {
            title: Some("MT (rescheduled)".to_string()),
            date: Some(date("2026-03-21")),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("milestone exists");

    assert_eq!(updated.title, "MT (rescheduled)");
    assert_eq!(updated.date, date("2026-03-21"));
    // Untouched fields survive.
    assert_eq!(updated.description.as_deref(), Some("original"));
    assert_eq!(updated.event_type, "demo-day");
}

#[sqlx::test]
async fn update_milestone_clears_description_with_explicit_null(pool: PgPool) {
    let created = MilestoneRepo::create(
        &pool,
        &CreateMilestone {
            description: Some("to be removed".to_string()),
            ..new_milestone("Session", "2026-05-04")
        },
    )
    .await
    .unwrap();

    let updated = MilestoneRepo::update(
        &pool,
        created.id,
        &UpdateMilestone {
            description: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("milestone exists");

    assert!(updated.description.is_none());
}

#[sqlx::test]
async fn update_missing_milestone_returns_none(pool: PgPool) {
    let result = MilestoneRepo::update(&pool, 999_999, &UpdateMilestone::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test]
async fn delete_milestone_detaches_todos_without_deleting_them(pool: PgPool) {
    let milestone = MilestoneRepo::create(&pool, &new_milestone("Demo Day", "2026-08-01"))
        .await
        .unwrap();
    let todo = TodoRepo::create(
        &pool,
        &CreateTodo {
            milestone_id: Some(milestone.id),
            ..new_todo("Prep slides")
        },
    )
    .await
    .unwrap();

    assert!(MilestoneRepo::delete(&pool, milestone.id).await.unwrap());

    let survivor = TodoRepo::find_by_id(&pool, todo.id)
        .await
        .unwrap()
        .expect("todo must survive milestone deletion");
    assert_eq!(survivor.milestone_id, None);
}

#[sqlx::test]
async fn delete_missing_milestone_returns_false(pool: PgPool) {
    assert!(!MilestoneRepo::delete(&pool, 999_999).await.unwrap());
}

// ---------------------------------------------------------------------------
// Todo creation defaults and sibling ordering
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_todo_defaults(pool: PgPool) {
    let todo = TodoRepo::create(&pool, &new_todo("First")).await.unwrap();

    assert_eq!(todo.status, STATUS_TODO);
    assert_eq!(todo.priority, PRIORITY_MEDIUM);
    // First todo in an empty scope starts at 0.
    assert_eq!(todo.sort_order, 0);
    assert!(todo.completed_at.is_none());
    assert!(todo.deadline.is_none());
}

#[sqlx::test]
async fn sibling_order_increments_within_milestone_scope(pool: PgPool) {
    let milestone = MilestoneRepo::create(&pool, &new_milestone("Demo Day", "2026-08-01"))
        .await
        .unwrap();

    for expected in 0..3 {
        let todo = TodoRepo::create(
            &pool,
            &CreateTodo {
                milestone_id: Some(milestone.id),
                ..new_todo("task")
            },
        )
        .await
        .unwrap();
        assert_eq!(todo.sort_order, expected);
    }

    // Siblings of orders {0, 1, 2} yield 3 for the next.
    let next = TodoRepo::create(
        &pool,
        &CreateTodo {
            milestone_id: Some(milestone.id),
            ..new_todo("fourth")
        },
    )
    .await
    .unwrap();
    assert_eq!(next.sort_order, 3);
}

#[sqlx::test]
async fn sibling_order_is_scoped_by_parent_not_milestone(pool: PgPool) {
    let milestone = MilestoneRepo::create(&pool, &new_milestone("Demo Day", "2026-08-01"))
        .await
        .unwrap();
    let root = TodoRepo::create(
        &pool,
        &CreateTodo {
            milestone_id: Some(milestone.id),
            ..new_todo("root")
        },
    )
    .await
    .unwrap();
    let _second_root = TodoRepo::create(
        &pool,
        &CreateTodo {
            milestone_id: Some(milestone.id),
            ..new_todo("root 2")
        },
    )
    .await
    .unwrap();

    // A child opens a fresh scope even though root siblings exist.
    let child = TodoRepo::create(
        &pool,
        &CreateTodo {
            milestone_id: Some(milestone.id),
            parent_id: Some(root.id),
            ..new_todo("child")
        },
    )
    .await
    .unwrap();
    assert_eq!(child.sort_order, 0);
}

#[sqlx::test]
async fn explicit_order_is_respected(pool: PgPool) {
    let todo = TodoRepo::create(
        &pool,
        &CreateTodo {
            sort_order: Some(42),
            ..new_todo("pinned")
        },
    )
    .await
    .unwrap();
    assert_eq!(todo.sort_order, 42);
}

// ---------------------------------------------------------------------------
// completed_at invariant
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn entering_done_stamps_completed_at_and_leaving_clears_it(pool: PgPool) {
    let todo = TodoRepo::create(&pool, &new_todo("finish me")).await.unwrap();

    let done = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            status: Some(STATUS_DONE.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("todo exists");
    assert_eq!(done.status, STATUS_DONE);
    let first_completion = done.completed_at.expect("DONE todo must have completed_at");

    let reopened = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            status: Some(STATUS_TODO.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("todo exists");
    assert!(reopened.completed_at.is_none());

    let done_again = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            status: Some(STATUS_DONE.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("todo exists");
    let second_completion = done_again.completed_at.expect("fresh completed_at");
    assert!(second_completion >= first_completion);
}

#[sqlx::test]
async fn update_without_status_leaves_completed_at_untouched(pool: PgPool) {
    let todo = TodoRepo::create(&pool, &new_todo("done task")).await.unwrap();
    let done = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            status: Some(STATUS_DONE.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    let stamped = done.completed_at.unwrap();

    let retitled = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            title: Some("renamed".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(retitled.title, "renamed");
    assert_eq!(retitled.completed_at, Some(stamped));
}

#[sqlx::test]
async fn resubmitting_done_keeps_the_original_timestamp(pool: PgPool) {
    let todo = TodoRepo::create(&pool, &new_todo("task")).await.unwrap();
    let done = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            status: Some(STATUS_DONE.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    let stamped = done.completed_at.unwrap();

    let still_done = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            status: Some(STATUS_DONE.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(still_done.completed_at, Some(stamped));
}

#[sqlx::test]
async fn non_done_statuses_never_carry_completed_at(pool: PgPool) {
    let todo = TodoRepo::create(&pool, &new_todo("task")).await.unwrap();
    let in_progress = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            status: Some(STATUS_IN_PROGRESS.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(in_progress.completed_at.is_none());
}

// ---------------------------------------------------------------------------
// Todo partial updates and deletion
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn update_todo_clears_nullable_fields_with_explicit_null(pool: PgPool) {
    let milestone = MilestoneRepo::create(&pool, &new_milestone("Demo Day", "2026-08-01"))
        .await
        .unwrap();
    let todo = TodoRepo::create(
        &pool,
        &CreateTodo {
            description: Some("desc".to_string()),
            deadline: Some(date("2026-07-30")),
            milestone_id: Some(milestone.id),
            ..new_todo("task")
        },
    )
    .await
    .unwrap();

    let updated = TodoRepo::update(
        &pool,
        todo.id,
        &UpdateTodo {
            description: Some(None),
            deadline: Some(None),
            milestone_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert!(updated.description.is_none());
    assert!(updated.deadline.is_none());
    assert!(updated.milestone_id.is_none());
    // Untouched fields survive.
    assert_eq!(updated.title, "task");
}

#[sqlx::test]
async fn update_missing_todo_returns_none(pool: PgPool) {
    let result = TodoRepo::update(&pool, 999_999, &UpdateTodo::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test]
async fn delete_todo_cascades_to_all_descendants(pool: PgPool) {
    let root = TodoRepo::create(&pool, &new_todo("root")).await.unwrap();
    let child = TodoRepo::create(
        &pool,
        &CreateTodo {
            parent_id: Some(root.id),
            ..new_todo("child")
        },
    )
    .await
    .unwrap();
    let grandchild = TodoRepo::create(
        &pool,
        &CreateTodo {
            parent_id: Some(child.id),
            ..new_todo("grandchild")
        },
    )
    .await
    .unwrap();

    assert!(TodoRepo::delete(&pool, root.id).await.unwrap());

    for id in [root.id, child.id, grandchild.id] {
        assert!(TodoRepo::find_by_id(&pool, id).await.unwrap().is_none());
    }
}

#[sqlx::test]
async fn delete_missing_todo_returns_false(pool: PgPool) {
    assert!(!TodoRepo::delete(&pool, 999_999).await.unwrap());
}
