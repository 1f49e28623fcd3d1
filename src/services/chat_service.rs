use crate::{
    dto::chat::{MessageList, SendMessageRequest},
    error::{AppError, AppResult},
    middleware::auth::MaybeUser,
    models::ChatMessage,
    response::{ApiResponse, Meta},
    state::AppState,
};

async fn ensure_product(state: &AppState, product_id: &str) -> AppResult<()> {
    let exists = state
        .store
        .read(|market| market.product(product_id).is_some())
        .await;
    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("product {product_id}")))
    }
}

/// Conversation about one product, oldest message first.
pub async fn list_messages(state: &AppState, product_id: &str) -> AppResult<ApiResponse<MessageList>> {
    ensure_product(state, product_id).await?;
    let items = state
        .store
        .read(|market| market.messages_for(product_id).cloned().collect())
        .await;
    Ok(ApiResponse::success("Messages", MessageList { items }, None))
}

pub async fn send_message(
    state: &AppState,
    caller: &MaybeUser,
    product_id: &str,
    payload: SendMessageRequest,
) -> AppResult<ApiResponse<ChatMessage>> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Message text is required".into()));
    }
    ensure_product(state, product_id).await?;

    let committed = state
        .store
        .send_message(caller.id(), product_id, text, payload.guest)
        .await;
    let message = committed.value?;
    Ok(ApiResponse::success("Message sent", message, Meta::synced(committed.sync)))
}
