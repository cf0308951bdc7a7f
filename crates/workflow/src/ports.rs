//! Storage ports for the workflow engine.
//!
//! The engine only ever sees these traits; [`crate::memory`] and
//! [`crate::postgres`] provide the implementations. Every method fails with a
//! [`CoreError`] so adapters translate their own errors at the boundary.

use std::collections::BTreeMap;

use async_trait::async_trait;
use ideahub_core::error::CoreError;
use ideahub_core::roles::Role;
use ideahub_core::status::IdeaStatus;
use ideahub_core::types::DbId;
use ideahub_db::models::idea::{CreateIdea, DomainCount, Idea};
use ideahub_db::models::notification::Notification;
use ideahub_db::models::review::{CreateReview, Review, ReviewWithIdea, TopRatedIdea};
use ideahub_db::models::user::{CreateUser, User};
use ideahub_events::NotificationSink;

/// Idea count per status. Statuses with no ideas may be absent.
pub type StatusCounts = BTreeMap<IdeaStatus, i64>;

/// Durable storage for ideas. No business rules beyond input validation.
#[async_trait]
pub trait IdeaStore: Send + Sync {
    /// Insert a `Submitted` idea with no reviewer. Blank fields are rejected.
    async fn create(&self, input: &CreateIdea) -> Result<Idea, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Idea>, CoreError>;

    /// All ideas, most recent first.
    async fn list_all(&self) -> Result<Vec<Idea>, CoreError>;

    /// Ideas owned by one innovator, most recent first.
    async fn list_by_innovator(&self, innovator_id: DbId) -> Result<Vec<Idea>, CoreError>;

    /// Ideas assigned to one reviewer, most recent first.
    async fn list_by_reviewer(&self, reviewer_id: DbId) -> Result<Vec<Idea>, CoreError>;

    /// Unconditional status write. Fails with `NotFound` for unknown ids.
    async fn set_status(&self, id: DbId, status: IdeaStatus) -> Result<Idea, CoreError>;

    /// Set the reviewer and move to `Under_Review` atomically.
    async fn set_reviewer(&self, id: DbId, reviewer_id: DbId) -> Result<Idea, CoreError>;

    async fn count_by_status(&self) -> Result<StatusCounts, CoreError>;

    /// Idea count per domain, ordered by domain name.
    async fn count_by_domain(&self) -> Result<Vec<DomainCount>, CoreError>;

    async fn count(&self) -> Result<i64, CoreError>;
}

/// Append-only storage for reviews.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Append a review. Out-of-range scores or blank feedback are rejected.
    ///
    /// A set `input.status` is written to the idea atomically with the review;
    /// an unknown idea fails with `NotFound` and stores nothing.
    async fn create(&self, input: &CreateReview) -> Result<Review, CoreError>;

    /// All reviews of an idea, newest first.
    async fn list_by_idea(&self, idea_id: DbId) -> Result<Vec<Review>, CoreError>;

    /// A reviewer's reviews with the reviewed idea's summary, newest first.
    async fn list_by_reviewer(&self, reviewer_id: DbId) -> Result<Vec<ReviewWithIdea>, CoreError>;

    /// Ideas ranked by their best per-review average score.
    async fn top_rated(&self, limit: usize) -> Result<Vec<TopRatedIdea>, CoreError>;
}

/// Lookup and registration of users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    /// Register a user. A taken email fails with `Conflict`.
    async fn create(&self, input: &CreateUser) -> Result<User, CoreError>;

    async fn list_all(&self) -> Result<Vec<User>, CoreError>;

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, CoreError>;
}

/// A user's inbox. Writing goes through the [`NotificationSink`] supertrait.
#[async_trait]
pub trait NotificationStore: NotificationSink {
    /// A user's notifications, newest first.
    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Notification>, CoreError>;

    /// Returns `false` if the notification does not exist or is not `user_id`'s.
    async fn mark_read(&self, notification_id: DbId, user_id: DbId) -> Result<bool, CoreError>;

    /// Returns the number of notifications that changed.
    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, CoreError>;

    async fn unread_count(&self, user_id: DbId) -> Result<i64, CoreError>;
}
