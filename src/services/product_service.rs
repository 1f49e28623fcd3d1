use rust_decimal::Decimal;

use crate::{
    dto::products::{CreateProductRequest, DistanceQuery, DistanceResponse, ProductList},
    error::{AppError, AppResult},
    geo,
    market::Ignored,
    middleware::auth::AuthUser,
    models::{GeoPoint, Product},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
    store::Committed,
};

pub async fn list_products(state: &AppState, query: ProductQuery) -> AppResult<ApiResponse<ProductList>> {
    let filter = query.filter();
    let matches: Vec<Product> = state
        .store
        .read(|market| market.search(&filter).into_iter().cloned().collect())
        .await;

    let pagination = query.pagination();
    let (page, per_page, _) = pagination.normalize();
    let total = matches.len() as u64;
    let items = pagination.apply(matches);

    let meta = Meta::new(page, per_page, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = state
        .store
        .read(|market| market.product(id).cloned())
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    auth: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }
    if payload.category.trim().is_empty() {
        return Err(AppError::BadRequest("Category is required".into()));
    }
    if payload.price < Decimal::ZERO {
        return Err(AppError::BadRequest("Price must not be negative".into()));
    }

    let committed = state.store.add_product(Some(auth.id()), payload.into()).await;
    let product = committed.value?;
    tracing::info!(product_id = %product.id, shop_id = %product.shop_id, "product listed");
    Ok(ApiResponse::success("Product created", product, Meta::synced(committed.sync)))
}

fn counter_response(
    committed: Committed<Result<Product, Ignored>>,
    message: &str,
) -> AppResult<ApiResponse<Product>> {
    let product = committed.value?;
    Ok(ApiResponse::success(message, product, Meta::synced(committed.sync)))
}

pub async fn like_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    counter_response(state.store.like_product(id).await, "Liked")
}

pub async fn view_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    counter_response(state.store.view_product(id).await, "Viewed")
}

/// Distance from the caller's position to the shop selling `id`.
pub async fn distance(
    state: &AppState,
    id: &str,
    query: DistanceQuery,
) -> AppResult<ApiResponse<DistanceResponse>> {
    let (shop_id, location) = state
        .store
        .read(|market| {
            let product = market.product(id)?;
            let location = market.shop(&product.shop_id).and_then(|shop| shop.location);
            Some((product.shop_id.clone(), location))
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let location = location.ok_or_else(|| AppError::NotFound(format!("location of shop {shop_id}")))?;

    let km = geo::distance_km(
        GeoPoint {
            lat: query.lat,
            lng: query.lng,
        },
        location,
    );
    Ok(ApiResponse::success(
        "Distance",
        DistanceResponse {
            shop_id,
            km,
            label: geo::format_distance(km),
        },
        None,
    ))
}
