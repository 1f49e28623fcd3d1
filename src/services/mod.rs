pub mod auth_service;
pub mod category_service;
pub mod chat_service;
pub mod order_service;
pub mod plan_service;
pub mod product_service;
pub mod profile_service;
pub mod shop_service;
pub mod sync_service;
