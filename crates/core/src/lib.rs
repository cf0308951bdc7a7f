//! Domain rules for the idea review workflow.
//!
//! Everything in this crate is pure: no I/O, no async. Persistence lives in
//! `ideahub-db`, orchestration in `ideahub-workflow`.

pub mod error;
pub mod idea;
pub mod roles;
pub mod scoring;
pub mod status;
pub mod types;
