use crate::{
    dto::{products::ProductList, shops::ShopList},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_shops(state: &AppState) -> AppResult<ApiResponse<ShopList>> {
    let items = state
        .store
        .read(|market| market.shops().cloned().collect())
        .await;
    Ok(ApiResponse::success("Shops", ShopList { items }, None))
}

pub async fn get_shop(state: &AppState, id: &str) -> AppResult<ApiResponse<User>> {
    let shop = state
        .store
        .read(|market| market.shop(id).cloned())
        .await
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;
    Ok(ApiResponse::success("Shop", shop, None))
}

pub async fn shop_products(
    state: &AppState,
    id: &str,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let products = state
        .store
        .read(|market| {
            market
                .shop(id)
                .map(|_| market.products_of(id).cloned().collect::<Vec<_>>())
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("shop {id}")))?;

    let (page, per_page, _) = pagination.normalize();
    let total = products.len() as u64;
    let items = pagination.apply(products);
    Ok(ApiResponse::success(
        "Shop products",
        ProductList { items },
        Some(Meta::new(page, per_page, total)),
    ))
}
