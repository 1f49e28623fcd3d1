use crate::{
    dto::orders::{OrderList, PlaceOrderRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
};

/// Which side of the order the caller is on.
#[derive(Debug, Clone, Copy)]
pub enum OrderSide {
    Buyer,
    Shop,
}

pub async fn list_orders(
    state: &AppState,
    auth: &AuthUser,
    side: OrderSide,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            OrderStatus::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown order status {raw}")))?,
        ),
        None => None,
    };
    if matches!(side, OrderSide::Shop) && !auth.user.is_shop() {
        return Err(AppError::Forbidden("only shops have sales".into()));
    }

    let orders: Vec<Order> = state
        .store
        .read(|market| {
            let wanted = |order: &&Order| status.is_none_or(|status| order.status == status);
            match side {
                OrderSide::Buyer => market.orders_as_buyer(auth.id()).filter(wanted).cloned().collect(),
                OrderSide::Shop => market.orders_as_shop(auth.id()).filter(wanted).cloned().collect(),
            }
        })
        .await;

    let pagination = query.pagination();
    let (page, per_page, _) = pagination.normalize();
    let total = orders.len() as u64;
    let items = pagination.apply(orders);

    Ok(ApiResponse::success(
        "Ok",
        OrderList { items },
        Some(Meta::new(page, per_page, total)),
    ))
}

pub async fn place_order(
    state: &AppState,
    auth: &AuthUser,
    payload: PlaceOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let committed = state
        .store
        .place_order(Some(auth.id()), payload.product_id.trim())
        .await;
    let order = committed.value?;
    tracing::info!(order_id = %order.id, buyer_id = %order.buyer_id, "order placed");
    Ok(ApiResponse::success("Order placed", order, Meta::synced(committed.sync)))
}
