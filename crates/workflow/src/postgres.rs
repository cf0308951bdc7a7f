//! Stores backed by the `ideahub-db` repositories.

use std::sync::Arc;

use async_trait::async_trait;
use ideahub_core::error::CoreError;
use ideahub_core::idea::validate_new_idea;
use ideahub_core::roles::Role;
use ideahub_core::scoring::{rank_top_rated, validate_feedback};
use ideahub_core::status::IdeaStatus;
use ideahub_core::types::DbId;
use ideahub_db::models::idea::{CreateIdea, DomainCount, Idea};
use ideahub_db::models::notification::Notification;
use ideahub_db::models::review::{CreateReview, Review, ReviewWithIdea, TopRatedIdea};
use ideahub_db::models::user::{CreateUser, User};
use ideahub_db::repositories::{IdeaRepo, NotificationRepo, ReviewRepo, UserRepo};
use ideahub_db::DbPool;
use ideahub_events::{Notice, NotificationSink};

use crate::backend::Backend;
use crate::ports::{IdeaStore, NotificationStore, ReviewStore, StatusCounts, UserDirectory};

/// Translate a sqlx error into the domain error the ports speak.
///
/// Unique violations (SQLSTATE 23505) become `Conflict`; everything else is
/// logged and surfaces as `Internal`.
pub fn map_db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let message = match db_err.constraint() {
                Some("uq_users_email") => "User with this email already exists".to_string(),
                Some(constraint) => format!("Duplicate value violates {constraint}"),
                None => "Duplicate value".to_string(),
            };
            return CoreError::Conflict(message);
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal("Database error".to_string())
}

/// Wire every store to one pool.
pub fn backend(pool: DbPool) -> Backend {
    let notifications = Arc::new(PgNotificationStore::new(pool.clone()));
    Backend {
        ideas: Arc::new(PgIdeaStore::new(pool.clone())),
        reviews: Arc::new(PgReviewStore::new(pool.clone())),
        users: Arc::new(PgUserDirectory::new(pool)),
        notifications: notifications.clone(),
        sink: notifications,
    }
}

pub struct PgIdeaStore {
    pool: DbPool,
}

impl PgIdeaStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeaStore for PgIdeaStore {
    async fn create(&self, input: &CreateIdea) -> Result<Idea, CoreError> {
        validate_new_idea(&input.title, &input.description, &input.domain)?;
        IdeaRepo::create(&self.pool, input).await.map_err(map_db_error)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Idea>, CoreError> {
        IdeaRepo::find_by_id(&self.pool, id).await.map_err(map_db_error)
    }

    async fn list_all(&self) -> Result<Vec<Idea>, CoreError> {
        IdeaRepo::list_all(&self.pool).await.map_err(map_db_error)
    }

    async fn list_by_innovator(&self, innovator_id: DbId) -> Result<Vec<Idea>, CoreError> {
        IdeaRepo::list_by_innovator(&self.pool, innovator_id)
            .await
            .map_err(map_db_error)
    }

    async fn list_by_reviewer(&self, reviewer_id: DbId) -> Result<Vec<Idea>, CoreError> {
        IdeaRepo::list_by_reviewer(&self.pool, reviewer_id)
            .await
            .map_err(map_db_error)
    }

    async fn set_status(&self, id: DbId, status: IdeaStatus) -> Result<Idea, CoreError> {
        IdeaRepo::set_status(&self.pool, id, status)
            .await
            .map_err(map_db_error)?
            .ok_or(CoreError::NotFound { entity: "Idea", id })
    }

    async fn set_reviewer(&self, id: DbId, reviewer_id: DbId) -> Result<Idea, CoreError> {
        IdeaRepo::set_reviewer(&self.pool, id, reviewer_id)
            .await
            .map_err(map_db_error)?
            .ok_or(CoreError::NotFound { entity: "Idea", id })
    }

    async fn count_by_status(&self) -> Result<StatusCounts, CoreError> {
        let rows = IdeaRepo::count_by_status(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(|row| (row.status, row.count)).collect())
    }

    async fn count_by_domain(&self) -> Result<Vec<DomainCount>, CoreError> {
        IdeaRepo::count_by_domain(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn count(&self) -> Result<i64, CoreError> {
        IdeaRepo::count(&self.pool).await.map_err(map_db_error)
    }
}

pub struct PgReviewStore {
    pool: DbPool,
}

impl PgReviewStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn create(&self, input: &CreateReview) -> Result<Review, CoreError> {
        input.scores.validate()?;
        validate_feedback(&input.feedback)?;
        ReviewRepo::create(&self.pool, input)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => CoreError::NotFound {
                    entity: "Idea",
                    id: input.idea_id,
                },
                other => map_db_error(other),
            })
    }

    async fn list_by_idea(&self, idea_id: DbId) -> Result<Vec<Review>, CoreError> {
        ReviewRepo::list_by_idea(&self.pool, idea_id)
            .await
            .map_err(map_db_error)
    }

    async fn list_by_reviewer(&self, reviewer_id: DbId) -> Result<Vec<ReviewWithIdea>, CoreError> {
        let rows = ReviewRepo::list_by_reviewer(&self.pool, reviewer_id)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(ReviewWithIdea::from).collect())
    }

    async fn top_rated(&self, limit: usize) -> Result<Vec<TopRatedIdea>, CoreError> {
        let rows = ReviewRepo::list_scored(&self.pool)
            .await
            .map_err(map_db_error)?;
        let ranked = rank_top_rated(rows.into_iter().map(|r| r.into_ranking_input()), limit);
        Ok(ranked.into_iter().map(TopRatedIdea::from).collect())
    }
}

pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(map_db_error)
    }

    async fn create(&self, input: &CreateUser) -> Result<User, CoreError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(map_db_error)
    }

    async fn list_all(&self) -> Result<Vec<User>, CoreError> {
        UserRepo::list_all(&self.pool).await.map_err(map_db_error)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, CoreError> {
        UserRepo::list_by_role(&self.pool, role)
            .await
            .map_err(map_db_error)
    }
}

pub struct PgNotificationStore {
    pool: DbPool,
}

impl PgNotificationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSink for PgNotificationStore {
    async fn emit(&self, notice: &Notice) -> Result<(), CoreError> {
        NotificationRepo::create(&self.pool, notice.user_id, &notice.message)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Notification>, CoreError> {
        NotificationRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(map_db_error)
    }

    async fn mark_read(&self, notification_id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        NotificationRepo::mark_read(&self.pool, notification_id, user_id)
            .await
            .map_err(map_db_error)
    }

    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, CoreError> {
        NotificationRepo::mark_all_read(&self.pool, user_id)
            .await
            .map_err(map_db_error)
    }

    async fn unread_count(&self, user_id: DbId) -> Result<i64, CoreError> {
        NotificationRepo::unread_count(&self.pool, user_id)
            .await
            .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_non_database_errors_map_to_internal() {
        let err = map_db_error(sqlx::Error::RowNotFound);
        assert_matches!(err, CoreError::Internal(_));
    }
}
