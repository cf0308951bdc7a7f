//! The idea review workflow.
//!
//! [`WorkflowEngine`] owns every rule about who may move an idea where.
//! Mutating operations return an [`Outcome`] whose notices the caller hands
//! to a [`NotificationDispatcher`](ideahub_events::NotificationDispatcher)
//! after the write succeeds. A notice never fails the operation.

use std::sync::Arc;

use ideahub_core::error::CoreError;
use ideahub_core::idea::validate_new_idea;
use ideahub_core::roles::Role;
use ideahub_core::scoring::{validate_feedback, ReviewScores, DEFAULT_TOP_RATED_LIMIT};
use ideahub_core::status::{validate_transition, Decision, IdeaStatus};
use ideahub_core::types::DbId;
use ideahub_db::models::idea::{CreateIdea, Idea, IdeaDetail};
use ideahub_db::models::review::{CreateReview, Review, ReviewWithIdea};
use ideahub_db::models::user::UserProfile;
use ideahub_events::Notice;

use crate::outcome::Outcome;
use crate::ports::{IdeaStore, ReviewStore, UserDirectory};
use crate::reports::{Analytics, IdeaStats};

/// A reviewer's evaluation as it arrives, before range checks.
#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub idea_id: DbId,
    pub reviewer_id: DbId,
    pub innovation_score: i32,
    pub feasibility_score: i32,
    pub impact_score: i32,
    pub feedback: String,
    pub decision: Option<Decision>,
}

#[derive(Clone)]
pub struct WorkflowEngine {
    ideas: Arc<dyn IdeaStore>,
    reviews: Arc<dyn ReviewStore>,
    users: Arc<dyn UserDirectory>,
}

impl WorkflowEngine {
    pub fn new(
        ideas: Arc<dyn IdeaStore>,
        reviews: Arc<dyn ReviewStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            ideas,
            reviews,
            users,
        }
    }

    /* ----------------------------------------------------------------------
    Mutations
    ---------------------------------------------------------------------- */

    /// Store a new idea as `Submitted` with no reviewer.
    pub async fn submit_idea(&self, input: CreateIdea) -> Result<Outcome<Idea>, CoreError> {
        validate_new_idea(&input.title, &input.description, &input.domain)?;

        let idea = self.ideas.create(&input).await?;
        tracing::info!(
            idea_id = idea.id,
            innovator_id = idea.innovator_id,
            domain = %idea.domain,
            "Idea submitted"
        );

        let notice = Notice::idea_submitted(idea.innovator_id, &idea.title);
        Ok(Outcome::new(idea).with_notice(notice))
    }

    /// Give an idea a reviewer and move it to `Under_Review`.
    ///
    /// Allowed from any status, replacing a previous reviewer.
    pub async fn assign_reviewer(
        &self,
        idea_id: DbId,
        reviewer_id: DbId,
    ) -> Result<Outcome<Idea>, CoreError> {
        let idea = self.require_idea(idea_id).await?;

        match self.users.find_by_id(reviewer_id).await? {
            Some(user) if user.role == Role::Reviewer => {}
            _ => return Err(CoreError::InvalidReviewer(reviewer_id)),
        }

        if matches!(idea.status, IdeaStatus::Approved | IdeaStatus::Rejected) {
            tracing::warn!(
                idea_id,
                status = %idea.status,
                "Assigning a reviewer reopens a closed idea"
            );
        }

        let updated = self.ideas.set_reviewer(idea_id, reviewer_id).await?;
        tracing::info!(
            idea_id,
            reviewer_id,
            previous_reviewer = ?idea.reviewer_id,
            from = %idea.status,
            "Reviewer assigned"
        );

        Ok(Outcome::new(updated)
            .with_notice(Notice::reviewer_assigned(reviewer_id, &idea.title))
            .with_notice(Notice::idea_under_review(idea.innovator_id, &idea.title)))
    }

    /// Move an idea along an edge of the transition table.
    ///
    /// `Under_Review` additionally needs a reviewer on record; without one the
    /// idea has to go through [`assign_reviewer`](Self::assign_reviewer).
    pub async fn update_status(
        &self,
        idea_id: DbId,
        new_status: IdeaStatus,
        caller_id: DbId,
    ) -> Result<Outcome<Idea>, CoreError> {
        let idea = self.require_idea(idea_id).await?;
        validate_transition(idea.status, new_status)?;

        if new_status == IdeaStatus::UnderReview && idea.reviewer_id.is_none() {
            return Err(CoreError::Validation(
                "Assign a reviewer to move an idea to Under_Review".to_string(),
            ));
        }

        let updated = self.ideas.set_status(idea_id, new_status).await?;
        tracing::info!(
            idea_id,
            caller_id,
            from = %idea.status,
            to = %new_status,
            "Idea status updated"
        );

        let notice = Notice::status_updated(idea.innovator_id, &idea.title, new_status);
        Ok(Outcome::new(updated).with_notice(notice))
    }

    /// Record a review and apply its decision, if any.
    ///
    /// Only the assigned reviewer may review. The review is stored even
    /// without a decision. A decision writes its status directly, bypassing
    /// the transition table, in the same store write as the review.
    pub async fn submit_review(
        &self,
        submission: ReviewSubmission,
    ) -> Result<Outcome<Review>, CoreError> {
        let idea = self.require_idea(submission.idea_id).await?;

        if idea.reviewer_id != Some(submission.reviewer_id) {
            return Err(CoreError::Forbidden(
                "You are not assigned to review this idea".to_string(),
            ));
        }

        let scores = ReviewScores::new(
            submission.innovation_score,
            submission.feasibility_score,
            submission.impact_score,
        )?;
        validate_feedback(&submission.feedback)?;

        let status = submission.decision.map(Decision::status);
        if let Some(to) = status {
            if !idea.status.can_transition_to(to) && idea.status != to {
                tracing::debug!(
                    idea_id = idea.id,
                    from = %idea.status,
                    %to,
                    "Review decision outside the transition table"
                );
            }
        }

        let review = self
            .reviews
            .create(&CreateReview {
                idea_id: idea.id,
                reviewer_id: submission.reviewer_id,
                scores,
                feedback: submission.feedback,
                status,
            })
            .await?;
        tracing::info!(
            review_id = review.id,
            idea_id = idea.id,
            reviewer_id = review.reviewer_id,
            decision = ?submission.decision,
            "Review submitted"
        );

        let notice = Notice::review_outcome(idea.innovator_id, &idea.title, submission.decision);
        Ok(Outcome::new(review).with_notice(notice))
    }

    /* ----------------------------------------------------------------------
    Queries
    ---------------------------------------------------------------------- */

    /// An idea with its innovator, reviewer, and reviews.
    pub async fn idea_detail(&self, idea_id: DbId) -> Result<IdeaDetail, CoreError> {
        let idea = self.require_idea(idea_id).await?;

        let innovator = self.profile(Some(idea.innovator_id)).await?;
        let reviewer = self.profile(idea.reviewer_id).await?;
        let reviews = self.reviews.list_by_idea(idea_id).await?;

        Ok(IdeaDetail {
            idea,
            innovator,
            reviewer,
            reviews,
        })
    }

    pub async fn list_ideas(&self) -> Result<Vec<Idea>, CoreError> {
        self.ideas.list_all().await
    }

    pub async fn ideas_by_innovator(&self, innovator_id: DbId) -> Result<Vec<Idea>, CoreError> {
        self.ideas.list_by_innovator(innovator_id).await
    }

    pub async fn ideas_for_reviewer(&self, reviewer_id: DbId) -> Result<Vec<Idea>, CoreError> {
        self.ideas.list_by_reviewer(reviewer_id).await
    }

    pub async fn reviews_for_idea(&self, idea_id: DbId) -> Result<Vec<Review>, CoreError> {
        self.require_idea(idea_id).await?;
        self.reviews.list_by_idea(idea_id).await
    }

    /// Reviews a reviewer has written, each with the idea it evaluates.
    pub async fn review_history(&self, reviewer_id: DbId) -> Result<Vec<ReviewWithIdea>, CoreError> {
        self.reviews.list_by_reviewer(reviewer_id).await
    }

    pub async fn stats(&self) -> Result<IdeaStats, CoreError> {
        let total = self.ideas.count().await?;
        let by_status = self.ideas.count_by_status().await?;
        let by_domain = self.ideas.count_by_domain().await?;
        Ok(IdeaStats::from_counts(total, &by_status, &by_domain))
    }

    pub async fn analytics(&self) -> Result<Analytics, CoreError> {
        let stats = self.stats().await?;
        let top_rated = self.reviews.top_rated(DEFAULT_TOP_RATED_LIMIT).await?;
        Ok(Analytics::compose(&stats, top_rated))
    }

    /* ----------------------------------------------------------------------
    Helpers
    ---------------------------------------------------------------------- */

    async fn require_idea(&self, idea_id: DbId) -> Result<Idea, CoreError> {
        self.ideas
            .find_by_id(idea_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Idea",
                id: idea_id,
            })
    }

    async fn profile(&self, user_id: Option<DbId>) -> Result<Option<UserProfile>, CoreError> {
        let Some(id) = user_id else {
            return Ok(None);
        };
        Ok(self
            .users
            .find_by_id(id)
            .await?
            .map(|user| UserProfile::from(&user)))
    }
}
