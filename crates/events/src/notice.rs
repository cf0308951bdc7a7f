//! Notification intents produced by workflow operations.

use ideahub_core::status::{Decision, IdeaStatus};
use ideahub_core::types::DbId;
use serde::Serialize;

/// A message to deliver to one user after a workflow write commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub user_id: DbId,
    pub message: String,
}

impl Notice {
    pub fn new(user_id: DbId, message: impl Into<String>) -> Self {
        Self {
            user_id,
            message: message.into(),
        }
    }

    /// Confirmation to the innovator that their idea was stored.
    pub fn idea_submitted(innovator_id: DbId, title: &str) -> Self {
        Self::new(
            innovator_id,
            format!("Your idea \"{title}\" has been submitted successfully."),
        )
    }

    /// Tells a reviewer an idea is waiting for them.
    pub fn reviewer_assigned(reviewer_id: DbId, title: &str) -> Self {
        Self::new(
            reviewer_id,
            format!("New idea \"{title}\" has been assigned to you for review."),
        )
    }

    /// Tells the innovator their idea has a reviewer.
    pub fn idea_under_review(innovator_id: DbId, title: &str) -> Self {
        Self::new(
            innovator_id,
            format!("Your idea \"{title}\" is now under review."),
        )
    }

    pub fn status_updated(innovator_id: DbId, title: &str, status: IdeaStatus) -> Self {
        Self::new(
            innovator_id,
            format!(
                "Your idea \"{title}\" status has been updated to \"{}\".",
                status.display_name()
            ),
        )
    }

    /// Outcome of a review; without a decision the idea was only "reviewed".
    pub fn review_outcome(innovator_id: DbId, title: &str, decision: Option<Decision>) -> Self {
        let outcome = decision.map_or("reviewed", |d| d.status().display_name());
        Self::new(
            innovator_id,
            format!("Your idea \"{title}\" has been {outcome}. Check reviewer feedback."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_update_uses_display_name() {
        let notice = Notice::status_updated(3, "X", IdeaStatus::NeedsImprovement);
        assert_eq!(notice.user_id, 3);
        assert_eq!(
            notice.message,
            "Your idea \"X\" status has been updated to \"Needs Improvement\"."
        );
    }

    #[test]
    fn test_review_outcome_with_and_without_decision() {
        let decided = Notice::review_outcome(1, "X", Some(Decision::Approved));
        assert_eq!(
            decided.message,
            "Your idea \"X\" has been Approved. Check reviewer feedback."
        );

        let undecided = Notice::review_outcome(1, "X", None);
        assert!(undecided.message.contains("has been reviewed."));
    }

    #[test]
    fn test_assignment_notices_address_different_users() {
        let to_reviewer = Notice::reviewer_assigned(8, "X");
        let to_innovator = Notice::idea_under_review(2, "X");
        assert_eq!(to_reviewer.user_id, 8);
        assert!(to_reviewer.message.contains("assigned to you"));
        assert_eq!(to_innovator.user_id, 2);
        assert!(to_innovator.message.contains("now under review"));
    }
}
