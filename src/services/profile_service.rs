use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ProfileFields, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn update_profile(
    state: &AppState,
    auth: &AuthUser,
    fields: ProfileFields,
) -> AppResult<ApiResponse<User>> {
    if let Some(location) = fields.location {
        let valid = (-90.0..=90.0).contains(&location.lat) && (-180.0..=180.0).contains(&location.lng);
        if !valid {
            return Err(AppError::BadRequest("Location is out of range".into()));
        }
    }

    let committed = state.store.update_user(Some(auth.id()), fields).await;
    let user = committed.value?;
    Ok(ApiResponse::success("Profile updated", user, Meta::synced(committed.sync)))
}
