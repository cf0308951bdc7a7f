use std::sync::Arc;

use ideahub_events::NotificationDispatcher;
use ideahub_workflow::ports::{NotificationStore, UserDirectory};
use ideahub_workflow::{Backend, WorkflowEngine};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything inside is an `Arc` or a handle around one.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub engine: WorkflowEngine,
    /// Delivers the notices returned by engine mutations.
    pub dispatcher: NotificationDispatcher,
    pub users: Arc<dyn UserDirectory>,
    pub notifications: Arc<dyn NotificationStore>,
}

impl AppState {
    pub fn new(config: ServerConfig, backend: &Backend) -> Self {
        Self {
            config: Arc::new(config),
            engine: backend.engine(),
            dispatcher: backend.dispatcher(),
            users: Arc::clone(&backend.users),
            notifications: Arc::clone(&backend.notifications),
        }
    }
}
