pub mod health;
pub mod milestone;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /milestones           list (with nested todos), create
/// /milestones/{id}      get, update, delete
///
/// /todos                list (filterable), create
/// /todos/{id}           get, update, delete
/// ```
///
/// Health routes are mounted separately at the root by the router builder.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/milestones", milestone::router())
        .nest("/todos", todo::router())
}
