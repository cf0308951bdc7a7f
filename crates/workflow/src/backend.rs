//! A complete set of store handles for one storage backend.

use std::sync::Arc;

use ideahub_events::{NotificationDispatcher, NotificationSink};

use crate::engine::WorkflowEngine;
use crate::ports::{IdeaStore, NotificationStore, ReviewStore, UserDirectory};

/// Trait-object handles to every store, wired once at startup.
///
/// `notifications` and `sink` point at the same store; the sink handle exists
/// so the dispatcher can be built without upcasting.
#[derive(Clone)]
pub struct Backend {
    pub ideas: Arc<dyn IdeaStore>,
    pub reviews: Arc<dyn ReviewStore>,
    pub users: Arc<dyn UserDirectory>,
    pub notifications: Arc<dyn NotificationStore>,
    pub sink: Arc<dyn NotificationSink>,
}

impl Backend {
    pub fn engine(&self) -> WorkflowEngine {
        WorkflowEngine::new(
            Arc::clone(&self.ideas),
            Arc::clone(&self.reviews),
            Arc::clone(&self.users),
        )
    }

    pub fn dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(Arc::clone(&self.sink))
    }
}
