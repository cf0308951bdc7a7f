//! Handlers for the `/reviews` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ideahub_core::status::Decision;
use ideahub_core::types::DbId;
use ideahub_db::models::review::{Review, ReviewWithIdea};
use ideahub_workflow::ReviewSubmission;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::handlers::deliver;
use crate::middleware::rbac::{RequireAuth, RequireReviewer};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /reviews`.
///
/// Score ranges and feedback are checked by the engine, after it has
/// confirmed the caller is the assigned reviewer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub idea_id: DbId,
    pub innovation_score: i32,
    pub feasibility_score: i32,
    pub impact_score: i32,
    pub feedback: String,
    /// Kept loose so a malformed decision never rejects the review itself.
    #[serde(default)]
    pub decision: Option<Value>,
}

/// POST /api/v1/reviews
///
/// An unrecognised `decision` is ignored: the review is stored and the idea
/// status is left alone.
pub async fn submit_review(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubmitReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let decision = input.decision.as_ref().and_then(parse_decision);

    let outcome = state
        .engine
        .submit_review(ReviewSubmission {
            idea_id: input.idea_id,
            reviewer_id: user.user_id,
            innovation_score: input.innovation_score,
            feasibility_score: input.feasibility_score,
            impact_score: input.impact_score,
            feedback: input.feedback,
            decision,
        })
        .await?;
    let review = deliver(&state, outcome).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// `None` for null, non-strings, and unknown names.
fn parse_decision(raw: &Value) -> Option<Decision> {
    let parsed = raw.as_str().and_then(Decision::parse);
    if parsed.is_none() && !raw.is_null() {
        tracing::debug!(decision = %raw, "Ignoring unrecognised review decision");
    }
    parsed
}

/// GET /api/v1/reviews/history
pub async fn review_history(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ReviewWithIdea>>>> {
    let history = state.engine.review_history(user.user_id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /api/v1/reviews/idea/{idea_id}
pub async fn reviews_for_idea(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(idea_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let reviews = state.engine.reviews_for_idea(idea_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_decision_accepts_only_known_names() {
        assert_eq!(parse_decision(&json!("Approved")), Some(Decision::Approved));
        assert_eq!(
            parse_decision(&json!("Needs_Improvement")),
            Some(Decision::NeedsImprovement)
        );
        assert_eq!(parse_decision(&json!("Maybe")), None);
        assert_eq!(parse_decision(&json!(5)), None);
        assert_eq!(parse_decision(&json!({ "status": "Approved" })), None);
        assert_eq!(parse_decision(&Value::Null), None);
    }
}
