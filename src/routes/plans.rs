use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::plans::{PlanList, UpgradePlanRequest, UpgradePlanResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    policy::SubscriptionStatus,
    response::ApiResponse,
    services::plan_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans))
        .route("/status", get(subscription_status))
        .route("/upgrade", post(upgrade_plan))
}

#[utoipa::path(
    get,
    path = "/api/plans",
    responses(
        (status = 200, description = "Purchasable plans", body = ApiResponse<PlanList>)
    ),
    tag = "Plans"
)]
pub async fn list_plans() -> Json<ApiResponse<PlanList>> {
    Json(plan_service::list_plans())
}

#[utoipa::path(
    get,
    path = "/api/plans/status",
    responses(
        (status = 200, description = "Quota and expiration of the caller's plan", body = ApiResponse<SubscriptionStatus>),
        (status = 403, description = "Not a shop")
    ),
    tag = "Plans"
)]
pub async fn subscription_status(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SubscriptionStatus>>> {
    let resp = plan_service::subscription_status(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/plans/upgrade",
    request_body = UpgradePlanRequest,
    responses(
        (status = 200, description = "Plan changed", body = ApiResponse<UpgradePlanResponse>),
        (status = 400, description = "Unknown plan")
    ),
    tag = "Plans"
)]
pub async fn upgrade_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpgradePlanRequest>,
) -> AppResult<Json<ApiResponse<UpgradePlanResponse>>> {
    let resp = plan_service::upgrade_plan(&state, &user, payload).await?;
    Ok(Json(resp))
}
