//! Subscription and listing-limit policy.
//!
//! Everything here is a pure function of the shop profile, the number of
//! listings it owns and the current instant.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::User,
    plans::{self, Plan},
};

/// Remaining-slot threshold under which a shop is warned about its quota.
pub const NEAR_LIMIT_MARGIN: u32 = 5;

/// Days-left threshold for the expiration warning.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubscriptionStatus {
    pub plan_id: String,
    pub plan_name: String,
    pub items_used: u32,
    /// `None` when the plan has no item limit.
    pub item_limit: Option<u32>,
    pub items_remaining: Option<u32>,
    pub is_limit_reached: bool,
    pub is_near_limit: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub days_until_expiration: i64,
    pub is_expired: bool,
    pub expires_soon: bool,
}

impl SubscriptionStatus {
    pub fn compute(user: &User, items_used: usize, now: DateTime<Utc>) -> Self {
        let plan = plans::resolve_plan(user.plan.as_deref());
        let items_used = u32::try_from(items_used).unwrap_or(u32::MAX);
        let (is_limit_reached, is_near_limit) = quota_flags(plan, items_used);
        let days_until_expiration = user
            .plan_expires_at
            .map(|expires_at| days_until(expires_at, now))
            .unwrap_or(0);
        let is_expired = days_until_expiration < 0;

        Self {
            plan_id: plan.id.to_string(),
            plan_name: plan.name.to_string(),
            items_used,
            item_limit: plan.item_limit,
            items_remaining: plan.item_limit.map(|limit| limit.saturating_sub(items_used)),
            is_limit_reached,
            is_near_limit,
            expires_at: user.plan_expires_at,
            days_until_expiration,
            is_expired,
            expires_soon: !is_expired && days_until_expiration <= EXPIRY_WARNING_DAYS,
        }
    }
}

/// `(is_limit_reached, is_near_limit)` for a plan at the given usage.
pub fn quota_flags(plan: &Plan, items_used: u32) -> (bool, bool) {
    match plan.item_limit {
        None => (false, false),
        Some(limit) => {
            let reached = items_used >= limit;
            let near = !reached && limit - items_used <= NEAR_LIMIT_MARGIN;
            (reached, near)
        }
    }
}

/// Whole days left until `expires_at`, rounded up. Negative once past.
pub fn days_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expires_at - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// Expiration after buying `plan`. Leaving the trial adds the bonus month.
pub fn upgraded_expiration(
    current_plan: Option<&str>,
    plan: &Plan,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let mut days = plan.duration_days;
    if plans::is_on_trial(current_plan) {
        days += plans::TRIAL_BONUS_DAYS;
    }
    now + Duration::days(days)
}
