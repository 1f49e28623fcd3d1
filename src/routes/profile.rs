use axum::{Json, Router, extract::State, routing::patch};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::{ProfileFields, User},
    response::ApiResponse,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", patch(update_profile))
}

#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = ProfileFields,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<User>),
        (status = 401, description = "Not signed in")
    ),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProfileFields>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = profile_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}
