//! Snake_case row shapes of the remote tables and their mapping to domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    Category, ChatMessage, GeoPoint, Order, OrderStatus, Product, ProfileFields, User, UserRole,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: String,
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub neighborhood: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub logo_url: Option<String>,
    pub plan: Option<String>,
    pub plan_expires_at: Option<DateTime<Utc>>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ProfileRow {
    pub fn from_user(user: &User, created_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id.clone(),
            email: Some(user.email.clone()),
            name: Some(user.name.clone()),
            role: user.role.as_str().to_string(),
            shop_name: user.shop_name.clone(),
            address: user.address.clone(),
            phone: user.phone.clone().or_else(|| Some(user.email.clone())),
            neighborhood: user.neighborhood.clone(),
            open_time: user.open_time.clone(),
            close_time: user.close_time.clone(),
            logo_url: user.logo_url.clone(),
            plan: user.plan.clone(),
            plan_expires_at: user.plan_expires_at,
            lat: user.location.map(|point| point.lat),
            lng: user.location.map(|point| point.lng),
            created_at: Some(created_at),
        }
    }
}

impl From<ProfileRow> for User {
    fn from(row: ProfileRow) -> Self {
        let name = row
            .shop_name
            .clone()
            .filter(|name| !name.is_empty())
            .or(row.name)
            .unwrap_or_default();
        let location = match (row.lat, row.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        };
        User {
            id: row.id,
            email: row.email.unwrap_or_default(),
            name,
            role: UserRole::parse_lossy(&row.role),
            shop_name: row.shop_name,
            address: row.address,
            phone: row.phone,
            neighborhood: row.neighborhood,
            open_time: row.open_time,
            close_time: row.close_time,
            logo_url: row.logo_url,
            location,
            plan: row.plan,
            plan_expires_at: row.plan_expires_at,
        }
    }
}

/// Column subset for a profile update. Only supplied columns are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_expires_at: Option<DateTime<Utc>>,
}

impl ProfilePatchRow {
    pub fn plan(plan: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            plan: Some(plan.to_string()),
            plan_expires_at: Some(expires_at),
            ..Self::default()
        }
    }
}

impl From<&ProfileFields> for ProfilePatchRow {
    fn from(fields: &ProfileFields) -> Self {
        Self {
            name: fields.shop_name.clone().or_else(|| fields.name.clone()),
            email: fields.email.clone(),
            shop_name: fields.shop_name.clone(),
            phone: fields.phone.clone(),
            address: fields.address.clone(),
            neighborhood: fields.neighborhood.clone(),
            open_time: fields.open_time.clone(),
            close_time: fields.close_time.clone(),
            logo_url: fields.logo_url.clone(),
            lat: fields.location.map(|point| point.lat),
            lng: fields.location.map(|point| point.lng),
            plan: None,
            plan_expires_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub shop_id: String,
    pub shop_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            shop_id: product.shop_id.clone(),
            shop_name: Some(product.shop_name.clone()),
            title: product.title.clone(),
            description: Some(product.description.clone()),
            price: product.price,
            image_url: Some(product.image_url.clone()),
            category: product.category.clone(),
            brand: product.brand.clone(),
            model: product.model.clone(),
            views: counter_to_column(product.views),
            likes: counter_to_column(product.likes),
            created_at: product.created_at,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            shop_id: row.shop_id,
            shop_name: row.shop_name.unwrap_or_default(),
            title: row.title,
            description: row.description.unwrap_or_default(),
            price: row.price,
            image_url: row.image_url.unwrap_or_default(),
            category: row.category,
            brand: row.brand,
            model: row.model,
            views: counter_from_column(row.views),
            likes: counter_from_column(row.likes),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
}

impl CounterPatchRow {
    pub fn new(views: Option<u64>, likes: Option<u64>) -> Self {
        Self {
            views: views.map(counter_to_column),
            likes: likes.map(counter_to_column),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageRow {
    pub id: String,
    pub product_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatMessageRow {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.clone(),
            product_id: message.product_id.clone(),
            sender_id: message.sender_id.clone(),
            sender_name: message.sender_name.clone(),
            text: message.text.clone(),
            created_at: message.timestamp,
        }
    }
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        ChatMessage {
            id: row.id,
            product_id: row.product_id,
            sender_id: row.sender_id,
            sender_name: row.sender_name,
            text: row.text,
            timestamp: row.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    pub id: String,
    pub buyer_id: String,
    pub shop_id: String,
    pub product_id: String,
    pub product_title: String,
    pub product_image: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            buyer_id: order.buyer_id.clone(),
            shop_id: order.shop_id.clone(),
            product_id: order.product_id.clone(),
            product_title: order.product_title.clone(),
            product_image: Some(order.product_image.clone()),
            price: order.price,
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
        }
    }
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            buyer_id: row.buyer_id,
            shop_id: row.shop_id,
            product_id: row.product_id,
            product_title: row.product_title,
            product_image: row.product_image.unwrap_or_default(),
            price: row.price,
            // Unknown statuses are treated as not yet advanced.
            status: OrderStatus::parse(&row.status).unwrap_or(OrderStatus::Pending),
            created_at: row.created_at,
        }
    }
}

fn counter_to_column(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn counter_from_column(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_row_prefers_shop_name_for_display() {
        let row: ProfileRow = serde_json::from_value(serde_json::json!({
            "id": "shop9",
            "email": "shop9@example.com",
            "name": "Owner",
            "role": "shop",
            "shop_name": "Loja Nove",
            "address": null,
            "phone": "(11) 1111-2222",
            "neighborhood": null,
            "open_time": "09:00",
            "close_time": null,
            "logo_url": null,
            "plan": "monthly",
            "plan_expires_at": "2030-01-01T00:00:00Z",
            "lat": -23.5,
            "lng": -46.6,
            "created_at": null
        }))
        .expect("profile row");
        let user = User::from(row);
        assert_eq!(user.name, "Loja Nove");
        assert_eq!(user.role, UserRole::Shop);
        assert_eq!(user.location, Some(GeoPoint { lat: -23.5, lng: -46.6 }));
        assert_eq!(user.open_time.as_deref(), Some("09:00"));
    }

    #[test]
    fn profile_patch_only_serializes_supplied_columns() {
        let fields = ProfileFields {
            shop_name: Some("Nova Loja".into()),
            open_time: Some("07:00".into()),
            ..ProfileFields::default()
        };
        let value = serde_json::to_value(ProfilePatchRow::from(&fields)).expect("patch json");
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Nova Loja",
                "shop_name": "Nova Loja",
                "open_time": "07:00"
            })
        );
    }

    #[test]
    fn product_price_is_a_json_number() {
        let row: ProductRow = serde_json::from_value(serde_json::json!({
            "id": "p9",
            "shop_id": "shop1",
            "shop_name": null,
            "title": "Mouse",
            "description": null,
            "price": 89.9,
            "image_url": null,
            "category": "Informática",
            "brand": null,
            "model": null,
            "views": 3,
            "likes": 1,
            "created_at": "2025-05-01T12:00:00Z"
        }))
        .expect("product row");
        assert_eq!(row.price, Decimal::new(899, 1));
        let product = Product::from(row);
        assert_eq!(product.views, 3);
        assert_eq!(product.shop_name, "");
    }
}
