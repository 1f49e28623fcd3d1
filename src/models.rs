use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Shop,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Shop => "shop",
            UserRole::Admin => "admin",
        }
    }

    /// Unknown role strings coming from the table store degrade to `User`.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "shop" => UserRole::Shop,
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub neighborhood: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub logo_url: Option<String>,
    pub location: Option<GeoPoint>,
    /// Plan id from the plan catalog; unset means the implicit free trial.
    pub plan: Option<String>,
    pub plan_expires_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_shop(&self) -> bool {
        self.role == UserRole::Shop
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Name shown on listings: the shop name when present, else the account name.
    pub fn display_name(&self) -> &str {
        self.shop_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.email == identifier || self.phone.as_deref() == Some(identifier)
    }
}

/// Partial profile used both for shop registration and profile updates.
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub neighborhood: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub logo_url: Option<String>,
    pub location: Option<GeoPoint>,
}

impl ProfileFields {
    /// Drops empty strings so they never overwrite stored values.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Self {
            name: keep(self.name),
            email: keep(self.email),
            shop_name: keep(self.shop_name),
            address: keep(self.address),
            phone: keep(self.phone),
            neighborhood: keep(self.neighborhood),
            open_time: keep(self.open_time),
            close_time: keep(self.close_time),
            logo_url: keep(self.logo_url),
            location: self.location,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the supplied fields into `user`. A new shop name renames the account too.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(shop_name) = &self.shop_name {
            user.shop_name = Some(shop_name.clone());
            user.name = shop_name.clone();
        }
        if let Some(address) = &self.address {
            user.address = Some(address.clone());
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(neighborhood) = &self.neighborhood {
            user.neighborhood = Some(neighborhood.clone());
        }
        if let Some(open_time) = &self.open_time {
            user.open_time = Some(open_time.clone());
        }
        if let Some(close_time) = &self.close_time {
            user.close_time = Some(close_time.clone());
        }
        if let Some(logo_url) = &self.logo_url {
            user.logo_url = Some(logo_url.clone());
        }
        if let Some(location) = self.location {
            user.location = Some(location);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub shop_id: String,
    pub shop_name: String,
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub views: u64,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a new listing; the store fills in the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub id: String,
    pub product_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Identity of an unauthenticated chat participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GuestInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Sent,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Sent => "sent",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "sent" => Some(OrderStatus::Sent),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub shop_id: String,
    pub product_id: String,
    pub product_title: String,
    pub product_image: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
