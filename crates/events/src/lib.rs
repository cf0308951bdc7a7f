//! Notification side effects for the idea workflow.
//!
//! Workflow operations describe who should be told what as a list of
//! [`Notice`]s. Once the primary write has succeeded, the caller hands that
//! list to a [`NotificationDispatcher`], which delivers each notice through a
//! [`NotificationSink`] on a best-effort basis.

pub mod dispatcher;
pub mod notice;
pub mod sink;

pub use dispatcher::{DispatchReport, NotificationDispatcher};
pub use notice::Notice;
pub use sink::NotificationSink;
