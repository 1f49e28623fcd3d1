use crate::{
    error::AppResult,
    market::sync::SyncReport,
    response::ApiResponse,
    state::AppState,
};

pub async fn sync_report(state: &AppState) -> AppResult<ApiResponse<SyncReport>> {
    let report = state.store.sync_report().await;
    if !report.failed.is_empty() {
        tracing::debug!(failed = report.failed.len(), "entities out of sync");
    }
    Ok(ApiResponse::success("Sync status", report, None))
}
