use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::{
    dto::auth::{Claims, GuestRequest, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    ids,
    middleware::auth::AuthUser,
    models::{GuestInfo, User, UserRole},
    response::{ApiResponse, Meta},
    state::AppState,
    store::Session,
    verification::Submitted,
};

pub const GUEST_NAME: &str = "Visitante";
const TOKEN_TTL_HOURS: i64 = 24;

pub fn issue_token(secret: &str, session: &Session) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: session.user.id.clone(),
        sid: session.id.clone(),
        role: session.user.role.as_str().to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest {
        identifier,
        role,
        sms_code,
        email_code,
        registration,
    } = payload;

    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(AppError::BadRequest("Phone or email is required".into()));
    }

    let registering_shop = role == UserRole::Shop && registration.is_some();
    state.config.verification.verify_login(
        Submitted {
            sms_code: &sms_code,
            email: registration.as_ref().and_then(|r| r.email.as_deref()),
            email_code: email_code.as_deref(),
        },
        registering_shop,
    )?;

    let committed = state.store.login(identifier, role, registration).await;
    let session = committed.value;
    let token = issue_token(&state.config.jwt_secret, &session)?;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token,
            user: session.user,
        },
        Meta::synced(committed.sync),
    ))
}

pub async fn logout(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<serde_json::Value>> {
    let ended = state.store.logout(&auth.session_id).await;
    tracing::info!(user_id = %auth.id(), ended, "session ended");
    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub fn me(auth: AuthUser) -> ApiResponse<User> {
    ApiResponse::success("Current user", auth.user, None)
}

/// Issues a fresh anonymous chat identity.
pub fn guest(payload: GuestRequest) -> ApiResponse<GuestInfo> {
    let name = payload
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| GUEST_NAME.to_string());
    let guest = GuestInfo {
        id: ids::guest_id(),
        name,
    };
    ApiResponse::success("Guest", guest, None)
}
