//! Request handlers, one module per resource.

pub mod auth;
pub mod ideas;
pub mod notifications;
pub mod reports;
pub mod reviews;
pub mod users;

use ideahub_workflow::Outcome;

use crate::state::AppState;

/// Hand an outcome's notices to the dispatcher and return its value.
///
/// Runs after the engine write has succeeded; delivery failures are logged by
/// the dispatcher and never reach the client.
pub(crate) async fn deliver<T>(state: &AppState, outcome: Outcome<T>) -> T {
    let (value, notices) = outcome.into_parts();
    state.dispatcher.dispatch(notices).await;
    value
}
