//! The port through which notices leave the workflow.

use async_trait::async_trait;
use ideahub_core::error::CoreError;

use crate::notice::Notice;

/// Records a notice for its recipient (database row, queue message, ...).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn emit(&self, notice: &Notice) -> Result<(), CoreError>;
}
