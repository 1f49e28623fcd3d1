use axum::{Json, extract::State};

use crate::{
    error::AppResult, market::sync::SyncReport, response::ApiResponse,
    services::sync_service, state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/sync",
    responses(
        (status = 200, description = "Entities whose last table-store write failed", body = ApiResponse<SyncReport>)
    ),
    tag = "Sync"
)]
pub async fn sync_status(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SyncReport>>> {
    let resp = sync_service::sync_report(&state).await?;
    Ok(Json(resp))
}
