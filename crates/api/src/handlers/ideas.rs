//! Handlers for the `/ideas` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ideahub_core::status::IdeaStatus;
use ideahub_core::types::DbId;
use ideahub_db::models::idea::{CreateIdea, Idea, IdeaDetail};
use ideahub_workflow::reports::IdeaStats;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::handlers::deliver;
use crate::middleware::rbac::{
    RequireAdmin, RequireAdminOrReviewer, RequireAuth, RequireInnovator, RequireReviewer,
};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /ideas`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitIdeaRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required (max 200 characters)"))]
    pub title: String,
    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,
    #[validate(length(min = 1, max = 100, message = "Domain is required (max 100 characters)"))]
    pub domain: String,
}

/// Request body for `PUT /ideas/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Request body for `PUT /ideas/{id}/assign`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignReviewerRequest {
    pub reviewer_id: DbId,
}

/// POST /api/v1/ideas
pub async fn submit_idea(
    RequireInnovator(user): RequireInnovator,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubmitIdeaRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let outcome = state
        .engine
        .submit_idea(CreateIdea {
            title: input.title,
            description: input.description,
            domain: input.domain,
            innovator_id: user.user_id,
        })
        .await?;
    let idea = deliver(&state, outcome).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: idea })))
}

/// GET /api/v1/ideas
pub async fn list_ideas(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Idea>>>> {
    let ideas = state.engine.list_ideas().await?;
    Ok(Json(DataResponse { data: ideas }))
}

/// GET /api/v1/ideas/my
pub async fn my_ideas(
    RequireInnovator(user): RequireInnovator,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Idea>>>> {
    let ideas = state.engine.ideas_by_innovator(user.user_id).await?;
    Ok(Json(DataResponse { data: ideas }))
}

/// GET /api/v1/ideas/assigned
pub async fn assigned_ideas(
    RequireReviewer(user): RequireReviewer,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Idea>>>> {
    let ideas = state.engine.ideas_for_reviewer(user.user_id).await?;
    Ok(Json(DataResponse { data: ideas }))
}

/// GET /api/v1/ideas/stats
pub async fn idea_stats(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<IdeaStats>>> {
    let stats = state.engine.stats().await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/ideas/{id}
pub async fn get_idea(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<IdeaDetail>>> {
    let detail = state.engine.idea_detail(id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/ideas/{id}/status
///
/// Only edges of the transition table are accepted.
pub async fn update_status(
    RequireAdminOrReviewer(user): RequireAdminOrReviewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Idea>>> {
    let status: IdeaStatus = input.status.parse()?;

    let outcome = state.engine.update_status(id, status, user.user_id).await?;
    let idea = deliver(&state, outcome).await;

    Ok(Json(DataResponse { data: idea }))
}

/// PUT /api/v1/ideas/{id}/assign
pub async fn assign_reviewer(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<AssignReviewerRequest>,
) -> AppResult<Json<DataResponse<Idea>>> {
    tracing::debug!(idea_id = id, admin_id = admin.user_id, "Assigning reviewer");

    let outcome = state.engine.assign_reviewer(id, input.reviewer_id).await?;
    let idea = deliver(&state, outcome).await;

    Ok(Json(DataResponse { data: idea }))
}
