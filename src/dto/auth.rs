use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ProfileFields, User, UserRole};

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    /// Phone number or email.
    pub identifier: String,
    #[serde(default)]
    pub role: UserRole,
    pub sms_code: String,
    pub email_code: Option<String>,
    /// Shop registration data; ignored when the identifier is already known.
    pub registration: Option<ProfileFields>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct GuestRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    /// Session id; the token is only honored while this session is live.
    pub sid: String,
    pub role: String,
    pub exp: usize,
}
