use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::auth::{GuestRequest, LoginRequest, LoginResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{GuestInfo, User},
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/guest", post(guest))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in, registering the profile if new", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Wrong verification code")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session revoked"),
        (status = 401, description = "Not signed in")
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = auth_service::logout(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "Not signed in")
    ),
    tag = "Auth"
)]
pub async fn me(user: AuthUser) -> Json<ApiResponse<User>> {
    Json(auth_service::me(user))
}

#[utoipa::path(
    post,
    path = "/api/auth/guest",
    request_body = GuestRequest,
    responses(
        (status = 200, description = "Anonymous chat identity", body = ApiResponse<GuestInfo>)
    ),
    tag = "Auth"
)]
pub async fn guest(payload: Option<Json<GuestRequest>>) -> Json<ApiResponse<GuestInfo>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    Json(auth_service::guest(payload))
}
