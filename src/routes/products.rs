use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::{
        chat::{MessageList, SendMessageRequest},
        products::{CreateProductRequest, DistanceQuery, DistanceResponse, ProductList},
    },
    error::AppResult,
    middleware::auth::{AuthUser, MaybeUser},
    models::{ChatMessage, Product},
    response::ApiResponse,
    routes::params::ProductQuery,
    services::{chat_service, product_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
        .route("/{id}/like", post(like_product))
        .route("/{id}/view", post(view_product))
        .route("/{id}/distance", get(product_distance))
        .route("/{id}/messages", get(list_messages).post(send_message))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Catalog, newest first", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Create product", body = ApiResponse<Product>),
        (status = 403, description = "Not a shop, or plan limit reached")
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::create_product(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/like",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Like counted", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn like_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::like_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/view",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "View counted", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn view_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::view_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/distance",
    params(
        ("id" = String, Path, description = "Product ID"),
        ("lat" = f64, Query, description = "Caller latitude"),
        ("lng" = f64, Query, description = "Caller longitude"),
    ),
    responses(
        (status = 200, description = "Distance to the selling shop", body = ApiResponse<DistanceResponse>),
        (status = 404, description = "Product or shop location not found"),
    ),
    tag = "Products"
)]
pub async fn product_distance(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<DistanceQuery>,
) -> AppResult<Json<ApiResponse<DistanceResponse>>> {
    let resp = product_service::distance(&state, &id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/messages",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Chat about the product", body = ApiResponse<MessageList>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Chat"
)]
pub async fn list_messages(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<MessageList>>> {
    let resp = chat_service::list_messages(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/messages",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message sent", body = ApiResponse<ChatMessage>),
        (status = 400, description = "Empty text or no sender"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Chat"
)]
pub async fn send_message(
    Path(id): Path<String>,
    State(state): State<AppState>,
    caller: MaybeUser,
    Json(payload): Json<SendMessageRequest>,
) -> AppResult<Json<ApiResponse<ChatMessage>>> {
    let resp = chat_service::send_message(&state, &caller, &id, payload).await?;
    Ok(Json(resp))
}
