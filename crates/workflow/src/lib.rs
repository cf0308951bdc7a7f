//! The idea review workflow engine and the storage ports it runs on.
//!
//! - [`ports`] -- store traits the engine depends on.
//! - [`engine`] -- [`WorkflowEngine`]: submission, assignment, status updates, reviews.
//! - [`reports`] -- statistics and analytics composition.
//! - [`memory`] -- in-memory stores, used by tests and local runs.
//! - [`postgres`] -- stores backed by `ideahub-db` repositories.

pub mod backend;
pub mod engine;
pub mod memory;
pub mod outcome;
pub mod ports;
pub mod postgres;
pub mod reports;

pub use backend::Backend;
pub use engine::{ReviewSubmission, WorkflowEngine};
pub use outcome::Outcome;
