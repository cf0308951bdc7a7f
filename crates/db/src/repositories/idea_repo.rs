//! Repository for the `ideas` table.
//!
//! Pure data access: callers validate status transitions before writing.

use ideahub_core::status::IdeaStatus;
use ideahub_core::types::DbId;
use sqlx::PgPool;

use crate::models::idea::{CreateIdea, DomainCount, Idea, StatusCount};

/// Column list for `ideas` queries.
const COLUMNS: &str =
    "id, title, description, domain, status, innovator_id, reviewer_id, created_at, updated_at";

/// Provides CRUD and aggregate operations for ideas.
pub struct IdeaRepo;

impl IdeaRepo {
    /// Insert a new idea in the `Submitted` state with no reviewer.
    pub async fn create(pool: &PgPool, input: &CreateIdea) -> Result<Idea, sqlx::Error> {
        let query = format!(
            "INSERT INTO ideas (title, description, domain, status, innovator_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.domain)
            .bind(IdeaStatus::Submitted.as_str())
            .bind(input.innovator_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ideas WHERE id = $1");
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every idea, most recent first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Idea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ideas ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Idea>(&query).fetch_all(pool).await
    }

    /// List ideas submitted by one innovator, most recent first.
    pub async fn list_by_innovator(
        pool: &PgPool,
        innovator_id: DbId,
    ) -> Result<Vec<Idea>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ideas \
             WHERE innovator_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(innovator_id)
            .fetch_all(pool)
            .await
    }

    /// List ideas currently assigned to one reviewer, most recent first.
    pub async fn list_by_reviewer(
        pool: &PgPool,
        reviewer_id: DbId,
    ) -> Result<Vec<Idea>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ideas \
             WHERE reviewer_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(reviewer_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the status. Returns `None` if the idea does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: IdeaStatus,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "UPDATE ideas SET status = $1, updated_at = NOW() \
             WHERE id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Assign a reviewer and move the idea to `Under_Review` in one statement.
    ///
    /// Returns `None` if the idea does not exist.
    pub async fn set_reviewer(
        pool: &PgPool,
        id: DbId,
        reviewer_id: DbId,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "UPDATE ideas SET reviewer_id = $1, status = $2, updated_at = NOW() \
             WHERE id = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(reviewer_id)
            .bind(IdeaStatus::UnderReview.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM ideas GROUP BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Idea counts per domain, ordered by domain name.
    pub async fn count_by_domain(pool: &PgPool) -> Result<Vec<DomainCount>, sqlx::Error> {
        sqlx::query_as::<_, DomainCount>(
            "SELECT domain, COUNT(*) AS count FROM ideas GROUP BY domain ORDER BY domain",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM ideas")
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }
}
