//! Row models and DTOs, one module per table.

pub mod idea;
pub mod notification;
pub mod review;
pub mod user;
