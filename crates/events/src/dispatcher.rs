//! Best-effort delivery of post-commit notices.

use std::sync::Arc;

use crate::notice::Notice;
use crate::sink::NotificationSink;

/// Counts of what happened to one batch of notices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Delivers notices after the primary write has committed.
///
/// A failed delivery is logged and skipped; it never surfaces as an error to
/// the operation that produced the notice.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sink: Arc<dyn NotificationSink>,
}

impl NotificationDispatcher {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Deliver every notice in order, continuing past failures.
    pub async fn dispatch(&self, notices: Vec<Notice>) -> DispatchReport {
        let mut report = DispatchReport::default();

        for notice in notices {
            match self.sink.emit(&notice).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        error = %e,
                        user_id = notice.user_id,
                        "Failed to deliver notification"
                    );
                }
            }
        }

        if report.delivered > 0 {
            tracing::debug!(delivered = report.delivered, "Notifications delivered");
        }

        report
    }
}
