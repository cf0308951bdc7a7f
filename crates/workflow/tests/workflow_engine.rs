//! End-to-end workflow tests against the in-memory backend.

use assert_matches::assert_matches;
use ideahub_core::error::CoreError;
use ideahub_core::roles::Role;
use ideahub_core::status::{Decision, IdeaStatus};
use ideahub_core::types::DbId;
use ideahub_db::models::idea::{CreateIdea, Idea};
use ideahub_db::models::review::Review;
use ideahub_db::models::user::CreateUser;
use ideahub_workflow::memory::MemoryBackend;
use ideahub_workflow::ports::{NotificationStore, UserDirectory};
use ideahub_workflow::{Backend, ReviewSubmission, WorkflowEngine};

struct Fixture {
    memory: MemoryBackend,
    backend: Backend,
    engine: WorkflowEngine,
    innovator: DbId,
    reviewer: DbId,
    admin: DbId,
}

async fn fixture() -> Fixture {
    let memory = MemoryBackend::new();
    let backend = memory.backend();
    let engine = backend.engine();

    let mut ids = Vec::new();
    for (name, role) in [
        ("Ivy", Role::Innovator),
        ("Rex", Role::Reviewer),
        ("Ada", Role::Admin),
    ] {
        let user = memory
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "hash".to_string(),
                role,
            })
            .await
            .unwrap();
        ids.push(user.id);
    }

    Fixture {
        memory,
        backend,
        engine,
        innovator: ids[0],
        reviewer: ids[1],
        admin: ids[2],
    }
}

fn idea_input(innovator_id: DbId, title: &str, domain: &str) -> CreateIdea {
    CreateIdea {
        title: title.to_string(),
        description: "Reuse the grey water from office sinks.".to_string(),
        domain: domain.to_string(),
        innovator_id,
    }
}

fn review(idea_id: DbId, reviewer_id: DbId, decision: Option<Decision>) -> ReviewSubmission {
    ReviewSubmission {
        idea_id,
        reviewer_id,
        innovation_score: 7,
        feasibility_score: 7,
        impact_score: 8,
        feedback: "Promising, needs a pilot.".to_string(),
        decision,
    }
}

async fn submitted(f: &Fixture, title: &str) -> DbId {
    let outcome = f
        .engine
        .submit_idea(idea_input(f.innovator, title, "Sustainability"))
        .await
        .unwrap();
    outcome.value.id
}

async fn assigned(f: &Fixture, idea_id: DbId) -> Idea {
    f.engine
        .assign_reviewer(idea_id, f.reviewer)
        .await
        .unwrap()
        .value
}

async fn reviewed(f: &Fixture, idea_id: DbId, decision: Option<Decision>) -> Review {
    f.engine
        .submit_review(review(idea_id, f.reviewer, decision))
        .await
        .unwrap()
        .value
}

#[tokio::test]
async fn test_full_review_cycle_with_notifications() {
    let f = fixture().await;
    let dispatcher = f.backend.dispatcher();

    let outcome = f
        .engine
        .submit_idea(idea_input(f.innovator, "Water Saver", "Sustainability"))
        .await
        .unwrap();
    assert_eq!(outcome.value.status, IdeaStatus::Submitted);
    assert_eq!(outcome.value.reviewer_id, None);
    let idea_id = outcome.value.id;
    dispatcher.dispatch(outcome.notices).await;

    let (idea, notices) = f
        .engine
        .assign_reviewer(idea_id, f.reviewer)
        .await
        .unwrap()
        .into_parts();
    assert_eq!(idea.status, IdeaStatus::UnderReview);
    assert_eq!(idea.reviewer_id, Some(f.reviewer));
    assert_eq!(notices.len(), 2);
    dispatcher.dispatch(notices).await;

    let outcome = f
        .engine
        .submit_review(review(idea_id, f.reviewer, Some(Decision::Approved)))
        .await
        .unwrap();
    dispatcher.dispatch(outcome.notices).await;

    let detail = f.engine.idea_detail(idea_id).await.unwrap();
    assert_eq!(detail.idea.status, IdeaStatus::Approved);
    assert_eq!(detail.reviews.len(), 1);
    assert_eq!(detail.innovator.unwrap().name, "Ivy");
    assert_eq!(detail.reviewer.unwrap().id, f.reviewer);

    let inbox = f.memory.notifications.list_for_user(f.innovator).await.unwrap();
    let messages: Vec<&str> = inbox.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Your idea \"Water Saver\" has been Approved. Check reviewer feedback.",
            "Your idea \"Water Saver\" is now under review.",
            "Your idea \"Water Saver\" has been submitted successfully.",
        ]
    );

    let reviewer_inbox = f.memory.notifications.list_for_user(f.reviewer).await.unwrap();
    assert_eq!(
        reviewer_inbox[0].message,
        "New idea \"Water Saver\" has been assigned to you for review."
    );
}

#[tokio::test]
async fn test_invalid_transition_leaves_status_unchanged() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Direct approval").await;

    let result = f
        .engine
        .update_status(idea_id, IdeaStatus::Approved, f.admin)
        .await;
    assert_matches!(
        result,
        Err(CoreError::InvalidTransition {
            from: IdeaStatus::Submitted,
            to: IdeaStatus::Approved
        })
    );

    let idea = f.engine.idea_detail(idea_id).await.unwrap().idea;
    assert_eq!(idea.status, IdeaStatus::Submitted);
}

#[tokio::test]
async fn test_approved_is_terminal_for_status_updates() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Terminal").await;
    assigned(&f, idea_id).await;
    let approved = f
        .engine
        .update_status(idea_id, IdeaStatus::Approved, f.admin)
        .await
        .unwrap();
    assert_eq!(approved.value.status, IdeaStatus::Approved);

    for next in IdeaStatus::ALL {
        let result = f.engine.update_status(idea_id, next, f.admin).await;
        assert_matches!(result, Err(CoreError::InvalidTransition { .. }));
    }
}

#[tokio::test]
async fn test_status_update_notifies_innovator_with_display_name() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Bike lanes").await;
    assigned(&f, idea_id).await;

    let outcome = f
        .engine
        .update_status(idea_id, IdeaStatus::NeedsImprovement, f.reviewer)
        .await
        .unwrap();
    assert_eq!(outcome.value.status, IdeaStatus::NeedsImprovement);
    assert_eq!(outcome.notices.len(), 1);
    assert_eq!(outcome.notices[0].user_id, f.innovator);
    assert!(outcome.notices[0].message.contains("\"Needs Improvement\""));
}

#[tokio::test]
async fn test_under_review_requires_a_reviewer_on_record() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Unassigned").await;

    let result = f
        .engine
        .update_status(idea_id, IdeaStatus::UnderReview, f.admin)
        .await;
    assert_matches!(result, Err(CoreError::Validation(_)));
}

#[tokio::test]
async fn test_assign_rejects_non_reviewer_and_unknown_user() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Needs a reviewer").await;

    let result = f.engine.assign_reviewer(idea_id, f.innovator).await;
    assert_matches!(result, Err(CoreError::InvalidReviewer(id)) if id == f.innovator);

    let result = f.engine.assign_reviewer(idea_id, 999).await;
    assert_matches!(result, Err(CoreError::InvalidReviewer(999)));

    let idea = f.engine.idea_detail(idea_id).await.unwrap().idea;
    assert_eq!(idea.status, IdeaStatus::Submitted);
    assert_eq!(idea.reviewer_id, None);
}

#[tokio::test]
async fn test_assign_unknown_idea_is_not_found() {
    let f = fixture().await;
    let result = f.engine.assign_reviewer(77, f.reviewer).await;
    assert_matches!(result, Err(CoreError::NotFound { id: 77, .. }));
}

#[tokio::test]
async fn test_reassignment_reopens_closed_idea() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Second look").await;
    assigned(&f, idea_id).await;
    reviewed(&f, idea_id, Some(Decision::Rejected)).await;

    let idea = assigned(&f, idea_id).await;
    assert_eq!(idea.status, IdeaStatus::UnderReview);
}

#[tokio::test]
async fn test_review_by_unassigned_reviewer_is_forbidden() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Not yours").await;

    let result = f
        .engine
        .submit_review(review(idea_id, f.reviewer, Some(Decision::Approved)))
        .await;
    assert_matches!(result, Err(CoreError::Forbidden(_)));

    assert!(f.engine.reviews_for_idea(idea_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_review_with_bad_scores_creates_nothing() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Bad scores").await;
    assigned(&f, idea_id).await;

    let mut submission = review(idea_id, f.reviewer, Some(Decision::Approved));
    submission.impact_score = 0;
    let result = f.engine.submit_review(submission).await;
    assert_matches!(result, Err(CoreError::Validation(_)));

    assert!(f.engine.reviews_for_idea(idea_id).await.unwrap().is_empty());
    let idea = f.engine.idea_detail(idea_id).await.unwrap().idea;
    assert_eq!(idea.status, IdeaStatus::UnderReview);
}

#[tokio::test]
async fn test_review_without_decision_keeps_status() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Just feedback").await;
    assigned(&f, idea_id).await;

    let outcome = f
        .engine
        .submit_review(review(idea_id, f.reviewer, None))
        .await
        .unwrap();
    assert!(outcome.notices[0].message.contains("has been reviewed"));

    let idea = f.engine.idea_detail(idea_id).await.unwrap().idea;
    assert_eq!(idea.status, IdeaStatus::UnderReview);
}

#[tokio::test]
async fn test_review_decision_bypasses_transition_table() {
    let f = fixture().await;
    let idea_id = submitted(&f, "Override").await;
    assigned(&f, idea_id).await;
    reviewed(&f, idea_id, Some(Decision::Approved)).await;

    // Approved -> Rejected is not an edge, but a review decision still applies.
    reviewed(&f, idea_id, Some(Decision::Rejected)).await;

    let detail = f.engine.idea_detail(idea_id).await.unwrap();
    assert_eq!(detail.idea.status, IdeaStatus::Rejected);
    assert_eq!(detail.reviews.len(), 2);
}

#[tokio::test]
async fn test_reviews_for_unknown_idea_is_not_found() {
    let f = fixture().await;
    assert_matches!(
        f.engine.reviews_for_idea(5).await,
        Err(CoreError::NotFound { .. })
    );
}

#[tokio::test]
async fn test_review_history_carries_idea_summary() {
    let f = fixture().await;
    let idea_id = submitted(&f, "History").await;
    assigned(&f, idea_id).await;
    reviewed(&f, idea_id, Some(Decision::NeedsImprovement)).await;

    let history = f.engine.review_history(f.reviewer).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].idea.title, "History");
    assert_eq!(history[0].idea.status, IdeaStatus::NeedsImprovement);
}

#[tokio::test]
async fn test_listings_scope_by_owner_and_reviewer() {
    let f = fixture().await;
    let first = submitted(&f, "First").await;
    submitted(&f, "Second").await;
    assigned(&f, first).await;

    assert_eq!(f.engine.list_ideas().await.unwrap().len(), 2);
    assert_eq!(f.engine.ideas_by_innovator(f.innovator).await.unwrap().len(), 2);
    assert!(f.engine.ideas_by_innovator(f.admin).await.unwrap().is_empty());

    let assigned = f.engine.ideas_for_reviewer(f.reviewer).await.unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].id, first);
}

#[tokio::test]
async fn test_stats_and_analytics() {
    let f = fixture().await;
    let a = submitted(&f, "A").await;
    let b = f
        .engine
        .submit_idea(idea_input(f.innovator, "B", "AI"))
        .await
        .unwrap()
        .value
        .id;
    submitted(&f, "C").await;

    assigned(&f, a).await;
    reviewed(&f, a, Some(Decision::Approved)).await;
    assigned(&f, b).await;

    let stats = f.engine.stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.submitted, 1);
    assert_eq!(stats.under_review, 1);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.by_domain["Sustainability"], 2);
    assert_eq!(stats.by_domain["AI"], 1);

    let analytics = f.engine.analytics().await.unwrap();
    assert_eq!(analytics.overview.total_ideas, 3);
    assert_eq!(analytics.overview.approval_rate, 33);
    assert_eq!(analytics.top_rated_ideas.len(), 1);
    assert_eq!(analytics.top_rated_ideas[0].idea.id, a);
    assert_eq!(analytics.top_rated_ideas[0].avg_score, 7.3);
}
