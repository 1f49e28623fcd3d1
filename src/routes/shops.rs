use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::{products::ProductList, shops::ShopList},
    error::AppResult,
    models::User,
    response::ApiResponse,
    routes::params::Pagination,
    services::shop_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shops))
        .route("/{id}", get(get_shop))
        .route("/{id}/products", get(shop_products))
}

#[utoipa::path(
    get,
    path = "/api/shops",
    responses(
        (status = 200, description = "Shop directory", body = ApiResponse<ShopList>)
    ),
    tag = "Shops"
)]
pub async fn list_shops(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ShopList>>> {
    let resp = shop_service::list_shops(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}",
    params(
        ("id" = String, Path, description = "Shop ID")
    ),
    responses(
        (status = 200, description = "Shop profile", body = ApiResponse<User>),
        (status = 404, description = "Shop not found"),
    ),
    tag = "Shops"
)]
pub async fn get_shop(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = shop_service::get_shop(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}/products",
    params(
        ("id" = String, Path, description = "Shop ID"),
        Pagination
    ),
    responses(
        (status = 200, description = "Listings of the shop", body = ApiResponse<ProductList>),
        (status = 404, description = "Shop not found"),
    ),
    tag = "Shops"
)]
pub async fn shop_products(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = shop_service::shop_products(&state, &id, pagination).await?;
    Ok(Json(resp))
}
