//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /              -> list_users
/// GET /role/{role}   -> users_by_role
/// GET /{id}          -> get_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/role/{role}", get(users::users_by_role))
        .route("/{id}", get(users::get_user))
}
