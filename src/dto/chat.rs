use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ChatMessage, GuestInfo};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub text: String,
    /// Sender identity when there is no session.
    pub guest: Option<GuestInfo>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct MessageList {
    #[schema(value_type = Vec<ChatMessage>)]
    pub items: Vec<ChatMessage>,
}
