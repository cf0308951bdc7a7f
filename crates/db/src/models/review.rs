//! Review entity models, DTOs, and report rows.

use ideahub_core::scoring::{RankedIdea, ReviewScores};
use ideahub_core::status::IdeaStatus;
use ideahub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::idea::IdeaSummary;

/// A row from the `reviews` table. Reviews are never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: DbId,
    pub idea_id: DbId,
    pub reviewer_id: DbId,
    pub innovation_score: i32,
    pub feasibility_score: i32,
    pub impact_score: i32,
    pub feedback: String,
    pub created_at: Timestamp,
}

impl Review {
    pub fn scores(&self) -> ReviewScores {
        ReviewScores {
            innovation_score: self.innovation_score,
            feasibility_score: self.feasibility_score,
            impact_score: self.impact_score,
        }
    }
}

/// DTO for creating a review.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub idea_id: DbId,
    pub reviewer_id: DbId,
    pub scores: ReviewScores,
    pub feedback: String,
    /// Idea status to write in the same transaction as the review.
    pub status: Option<IdeaStatus>,
}

/// A review joined with a summary of the idea it evaluates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithIdea {
    #[serde(flatten)]
    pub review: Review,
    pub idea: IdeaSummary,
}

/// Flat join row behind [`ReviewWithIdea`].
#[derive(Debug, Clone, FromRow)]
pub struct ReviewHistoryRow {
    pub id: DbId,
    pub idea_id: DbId,
    pub reviewer_id: DbId,
    pub innovation_score: i32,
    pub feasibility_score: i32,
    pub impact_score: i32,
    pub feedback: String,
    pub created_at: Timestamp,
    pub idea_title: String,
    pub idea_domain: String,
    #[sqlx(try_from = "String")]
    pub idea_status: IdeaStatus,
}

impl From<ReviewHistoryRow> for ReviewWithIdea {
    fn from(row: ReviewHistoryRow) -> Self {
        Self {
            idea: IdeaSummary {
                id: row.idea_id,
                title: row.idea_title,
                domain: row.idea_domain,
                status: row.idea_status,
            },
            review: Review {
                id: row.id,
                idea_id: row.idea_id,
                reviewer_id: row.reviewer_id,
                innovation_score: row.innovation_score,
                feasibility_score: row.feasibility_score,
                impact_score: row.impact_score,
                feedback: row.feedback,
                created_at: row.created_at,
            },
        }
    }
}

/// Per-review scores with the idea summary, input to top-rated ranking.
#[derive(Debug, Clone, FromRow)]
pub struct ScoredReviewRow {
    pub idea_id: DbId,
    pub innovation_score: i32,
    pub feasibility_score: i32,
    pub impact_score: i32,
    pub title: String,
    pub domain: String,
    #[sqlx(try_from = "String")]
    pub status: IdeaStatus,
}

impl ScoredReviewRow {
    /// Split into the `(idea_id, scores, summary)` triple ranking expects.
    pub fn into_ranking_input(self) -> (DbId, ReviewScores, IdeaSummary) {
        let scores = ReviewScores {
            innovation_score: self.innovation_score,
            feasibility_score: self.feasibility_score,
            impact_score: self.impact_score,
        };
        let summary = IdeaSummary {
            id: self.idea_id,
            title: self.title,
            domain: self.domain,
            status: self.status,
        };
        (self.idea_id, scores, summary)
    }
}

/// One entry of the top-rated report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRatedIdea {
    #[serde(flatten)]
    pub idea: IdeaSummary,
    /// Best per-review average, one decimal place.
    pub avg_score: f64,
    #[serde(flatten)]
    pub scores: ReviewScores,
}

impl From<RankedIdea<IdeaSummary>> for TopRatedIdea {
    fn from(ranked: RankedIdea<IdeaSummary>) -> Self {
        Self {
            idea: ranked.item,
            avg_score: ranked.avg_score,
            scores: ranked.scores,
        }
    }
}
