use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::User, plans::Plan, policy::SubscriptionStatus};

#[derive(Debug, Serialize, ToSchema)]
pub struct PlanView {
    pub id: String,
    pub name: String,
    /// Price in BRL, two decimals.
    pub price: String,
    pub duration_days: i64,
    pub item_limit: Option<u32>,
    pub description: String,
}

impl From<&Plan> for PlanView {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id.to_string(),
            name: plan.name.to_string(),
            price: plan.price().to_string(),
            duration_days: plan.duration_days,
            item_limit: plan.item_limit,
            description: plan.description.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct PlanList {
    #[schema(value_type = Vec<PlanView>)]
    pub items: Vec<PlanView>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpgradePlanRequest {
    pub plan_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpgradePlanResponse {
    pub user: User,
    pub status: SubscriptionStatus,
}
