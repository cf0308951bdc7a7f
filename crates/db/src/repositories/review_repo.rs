//! Repository for the `reviews` table.

use ideahub_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, ReviewHistoryRow, ScoredReviewRow};

/// Column list for `reviews` queries.
const COLUMNS: &str = "id, idea_id, reviewer_id, innovation_score, feasibility_score, \
    impact_score, feedback, created_at";

/// Provides insert and query operations for reviews. Reviews are append-only.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Append a new review, returning the created row.
    ///
    /// When `input.status` is set the idea's status is written in the same
    /// transaction, so either both land or neither does.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(status) = input.status {
            let result = sqlx::query(
                "UPDATE ideas SET status = $1, updated_at = NOW() \
                 WHERE id = $2",
            )
            .bind(status.as_str())
            .bind(input.idea_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(sqlx::Error::RowNotFound);
            }
        }

        let query = format!(
            "INSERT INTO reviews \
                (idea_id, reviewer_id, innovation_score, feasibility_score, impact_score, feedback) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(input.idea_id)
            .bind(input.reviewer_id)
            .bind(input.scores.innovation_score)
            .bind(input.scores.feasibility_score)
            .bind(input.scores.impact_score)
            .bind(&input.feedback)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(review)
    }

    /// List all reviews of an idea, newest first.
    pub async fn list_by_idea(pool: &PgPool, idea_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE idea_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(idea_id)
            .fetch_all(pool)
            .await
    }

    /// List a reviewer's reviews joined with the reviewed idea, newest first.
    pub async fn list_by_reviewer(
        pool: &PgPool,
        reviewer_id: DbId,
    ) -> Result<Vec<ReviewHistoryRow>, sqlx::Error> {
        sqlx::query_as::<_, ReviewHistoryRow>(
            "SELECT r.id, r.idea_id, r.reviewer_id, r.innovation_score, r.feasibility_score,
                    r.impact_score, r.feedback, r.created_at,
                    i.title AS idea_title, i.domain AS idea_domain, i.status AS idea_status
             FROM reviews r
             INNER JOIN ideas i ON i.id = r.idea_id
             WHERE r.reviewer_id = $1
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(reviewer_id)
        .fetch_all(pool)
        .await
    }

    /// Every review's scores with its idea summary, for top-rated ranking.
    pub async fn list_scored(pool: &PgPool) -> Result<Vec<ScoredReviewRow>, sqlx::Error> {
        sqlx::query_as::<_, ScoredReviewRow>(
            "SELECT r.idea_id, r.innovation_score, r.feasibility_score, r.impact_score,
                    i.title, i.domain, i.status
             FROM reviews r
             INNER JOIN ideas i ON i.id = r.idea_id
             ORDER BY r.id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
