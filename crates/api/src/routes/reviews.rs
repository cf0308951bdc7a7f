//! Route definitions for the `/reviews` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// POST /                   -> submit_review
/// GET  /history            -> review_history
/// GET  /idea/{idea_id}     -> reviews_for_idea
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reviews::submit_review))
        .route("/history", get(reviews::review_history))
        .route("/idea/{idea_id}", get(reviews::reviews_for_idea))
}
