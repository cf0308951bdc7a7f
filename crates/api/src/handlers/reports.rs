//! Handlers for the `/reports` resource.

use axum::extract::State;
use axum::Json;
use ideahub_workflow::reports::Analytics;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/analytics
pub async fn analytics(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Analytics>>> {
    let analytics = state.engine.analytics().await?;
    Ok(Json(DataResponse { data: analytics }))
}
