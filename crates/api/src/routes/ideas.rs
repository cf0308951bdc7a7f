//! Route definitions for the `/ideas` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::ideas;
use crate::state::AppState;

/// Routes mounted at `/ideas`.
///
/// ```text
/// POST /              -> submit_idea
/// GET  /              -> list_ideas
/// GET  /my            -> my_ideas
/// GET  /assigned      -> assigned_ideas
/// GET  /stats         -> idea_stats
/// GET  /{id}          -> get_idea
/// PUT  /{id}/status   -> update_status
/// PUT  /{id}/assign   -> assign_reviewer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ideas::list_ideas).post(ideas::submit_idea))
        .route("/my", get(ideas::my_ideas))
        .route("/assigned", get(ideas::assigned_ideas))
        .route("/stats", get(ideas::idea_stats))
        .route("/{id}", get(ideas::get_idea))
        .route("/{id}/status", put(ideas::update_status))
        .route("/{id}/assign", put(ideas::assign_reviewer))
}
