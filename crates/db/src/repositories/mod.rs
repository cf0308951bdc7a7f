//! Stateless repositories over the PostgreSQL pool.

pub mod idea_repo;
pub mod notification_repo;
pub mod review_repo;
pub mod user_repo;

pub use idea_repo::IdeaRepo;
pub use notification_repo::NotificationRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
