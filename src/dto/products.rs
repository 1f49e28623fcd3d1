use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{NewProduct, Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            title: req.title.trim().to_string(),
            description: req.description,
            price: req.price,
            image_url: req.image_url,
            category: req.category,
            brand: req.brand,
            model: req.model,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DistanceQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DistanceResponse {
    pub shop_id: String,
    pub km: f64,
    /// Human-readable form, e.g. `850 m` or `3.2 km`.
    pub label: String,
}
