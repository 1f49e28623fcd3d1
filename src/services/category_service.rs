use crate::{
    dto::catalog::{CategoryList, CreateCategoryRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Category,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = state.store.read(|market| market.categories.clone()).await;
    Ok(ApiResponse::success("Categories", CategoryList { items }, None))
}

pub async fn create_category(
    state: &AppState,
    auth: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Category name is required".into()));
    }

    let committed = state.store.add_category(Some(auth.id()), name).await;
    let category = committed.value?;
    tracing::info!(category_id = %category.id, name = %category.name, "category added");
    Ok(ApiResponse::success("Category created", category, Meta::synced(committed.sync)))
}

pub async fn delete_category(
    state: &AppState,
    auth: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Category>> {
    let committed = state.store.remove_category(Some(auth.id()), id).await;
    let category = committed.value?;
    tracing::info!(category_id = %category.id, "category removed");
    Ok(ApiResponse::success("Category removed", category, Meta::synced(committed.sync)))
}
