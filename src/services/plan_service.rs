use chrono::Utc;

use crate::{
    dto::plans::{PlanList, PlanView, UpgradePlanRequest, UpgradePlanResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    plans::PLANS,
    policy::SubscriptionStatus,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn list_plans() -> ApiResponse<PlanList> {
    let items = PLANS.iter().map(PlanView::from).collect();
    ApiResponse::success("Plans", PlanList { items }, None)
}

async fn status_of(state: &AppState, user: &User) -> SubscriptionStatus {
    let used = state
        .store
        .read(|market| market.count_products_of(&user.id))
        .await;
    SubscriptionStatus::compute(user, used, Utc::now())
}

pub async fn subscription_status(
    state: &AppState,
    auth: &AuthUser,
) -> AppResult<ApiResponse<SubscriptionStatus>> {
    if !auth.user.is_shop() {
        return Err(AppError::Forbidden("only shops have a subscription".into()));
    }
    let status = status_of(state, &auth.user).await;
    Ok(ApiResponse::success("Subscription", status, None))
}

pub async fn upgrade_plan(
    state: &AppState,
    auth: &AuthUser,
    payload: UpgradePlanRequest,
) -> AppResult<ApiResponse<UpgradePlanResponse>> {
    let committed = state
        .store
        .upgrade_plan(Some(auth.id()), payload.plan_id.trim())
        .await;
    let user = committed.value?;
    let status = status_of(state, &user).await;
    tracing::info!(
        user_id = %user.id,
        plan = %status.plan_id,
        days = status.days_until_expiration,
        "plan upgraded"
    );

    Ok(ApiResponse::success(
        "Plan upgraded",
        UpgradePlanResponse { user, status },
        Meta::synced(committed.sync),
    ))
}
