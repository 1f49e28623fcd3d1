use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{GuestRequest, LoginRequest, LoginResponse},
        catalog::{CategoryList, CreateCategoryRequest},
        chat::{MessageList, SendMessageRequest},
        orders::{OrderList, PlaceOrderRequest},
        plans::{PlanList, PlanView, UpgradePlanRequest, UpgradePlanResponse},
        products::{CreateProductRequest, DistanceResponse, ProductList},
        shops::ShopList,
    },
    market::sync::{EntityRef, SyncEntry, SyncReport, SyncState, Table},
    models::{Category, ChatMessage, GeoPoint, GuestInfo, Order, OrderStatus, Product, ProfileFields, User, UserRole},
    policy::SubscriptionStatus,
    response::{ApiResponse, Meta},
    routes::{auth, categories, health, orders, params, plans, products, profile, shops, sync},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        auth::me,
        auth::guest,
        profile::update_profile,
        products::list_products,
        products::create_product,
        products::get_product,
        products::like_product,
        products::view_product,
        products::product_distance,
        products::list_messages,
        products::send_message,
        shops::list_shops,
        shops::get_shop,
        shops::shop_products,
        categories::list_categories,
        categories::create_category,
        categories::delete_category,
        plans::list_plans,
        plans::subscription_status,
        plans::upgrade_plan,
        orders::list_orders,
        orders::list_sales,
        orders::place_order,
        sync::sync_status
    ),
    components(
        schemas(
            User,
            UserRole,
            GeoPoint,
            ProfileFields,
            Product,
            Category,
            ChatMessage,
            GuestInfo,
            Order,
            OrderStatus,
            LoginRequest,
            LoginResponse,
            GuestRequest,
            CreateProductRequest,
            ProductList,
            DistanceResponse,
            SendMessageRequest,
            MessageList,
            CreateCategoryRequest,
            CategoryList,
            ShopList,
            PlanView,
            PlanList,
            UpgradePlanRequest,
            UpgradePlanResponse,
            SubscriptionStatus,
            PlaceOrderRequest,
            OrderList,
            Table,
            EntityRef,
            SyncState,
            SyncEntry,
            SyncReport,
            params::Pagination,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<User>,
            ApiResponse<OrderList>,
            ApiResponse<SyncReport>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Sign-in, sessions and guest identities"),
        (name = "Profile", description = "Profile of the signed-in user"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Chat", description = "Per-product conversations"),
        (name = "Shops", description = "Shop directory"),
        (name = "Categories", description = "Category administration"),
        (name = "Plans", description = "Listing plans and quotas"),
        (name = "Orders", description = "Purchases and sales"),
        (name = "Sync", description = "Table store mirror status"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
