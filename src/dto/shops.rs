use serde::Serialize;
use utoipa::ToSchema;

use crate::models::User;

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ShopList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}
