//! Idea entity models, DTOs, and aggregate rows.

use ideahub_core::status::IdeaStatus;
use ideahub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::review::Review;
use crate::models::user::UserProfile;

/// A row from the `ideas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub domain: String,
    #[sqlx(try_from = "String")]
    pub status: IdeaStatus,
    pub innovator_id: DbId,
    pub reviewer_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Idea {
    pub fn summary(&self) -> IdeaSummary {
        IdeaSummary {
            id: self.id,
            title: self.title.clone(),
            domain: self.domain.clone(),
            status: self.status,
        }
    }
}

/// DTO for creating a new idea.
#[derive(Debug, Clone)]
pub struct CreateIdea {
    pub title: String,
    pub description: String,
    pub domain: String,
    pub innovator_id: DbId,
}

/// The handful of idea fields embedded in review listings and reports.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSummary {
    pub id: DbId,
    pub title: String,
    pub domain: String,
    #[sqlx(try_from = "String")]
    pub status: IdeaStatus,
}

/// An idea with its people and reviews resolved, for the detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDetail {
    #[serde(flatten)]
    pub idea: Idea,
    pub innovator: Option<UserProfile>,
    pub reviewer: Option<UserProfile>,
    pub reviews: Vec<Review>,
}

/* --------------------------------------------------------------------------
   Aggregation rows
   -------------------------------------------------------------------------- */

/// Idea count per status (aggregate query result).
#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    #[sqlx(try_from = "String")]
    pub status: IdeaStatus,
    pub count: i64,
}

/// Idea count per domain (aggregate query result).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: i64,
}
