//! Route definitions for milestones.

use axum::routing::get;
use axum::Router;

use crate::handlers::milestone;
use crate::state::AppState;

/// Routes mounted at `/milestones`.
///
/// ```text
/// GET    /          -> list (each milestone carries its todo tree)
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete (referencing todos are detached)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(milestone::list).post(milestone::create))
        .route(
            "/{id}",
            get(milestone::get_by_id)
                .put(milestone::update)
                .delete(milestone::delete),
        )
}
