pub mod auth;
pub mod health;
pub mod ideas;
pub mod notifications;
pub mod reports;
pub mod reviews;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
/// /auth/me                            caller profile
///
/// /ideas                              submit (innovator), list all (admin)
/// /ideas/my                           caller's ideas (innovator)
/// /ideas/assigned                     ideas assigned to caller (reviewer)
/// /ideas/stats                        counts (admin)
/// /ideas/{id}                         detail
/// /ideas/{id}/status                  status update (admin, reviewer)
/// /ideas/{id}/assign                  assign reviewer (admin)
///
/// /reviews                            submit (reviewer)
/// /reviews/history                    caller's reviews (reviewer)
/// /reviews/idea/{idea_id}             reviews of one idea
///
/// /reports/analytics                  analytics (admin)
///
/// /users                              list (admin)
/// /users/role/{role}                  list by role (admin)
/// /users/{id}                         profile
///
/// /notifications                      caller's inbox
/// /notifications/unread-count         unread count
/// /notifications/read-all             mark all read
/// /notifications/{id}/read            mark one read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/ideas", ideas::router())
        .nest("/reviews", reviews::router())
        .nest("/reports", reports::router())
        .nest("/users", users::router())
        .nest("/notifications", notifications::router())
}
