//! Demo data used when no table store is configured.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::MarketState;
use crate::models::{GeoPoint, Order, OrderStatus, Product, User, UserRole};

impl MarketState {
    /// Default categories plus two shops, two listings and one delivered order.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            profiles: mock_shops(now),
            products: mock_products(now),
            orders: mock_orders(now),
            ..Self::new()
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn shop(
    id: &str,
    email: &str,
    name: &str,
    address: &str,
    phone: &str,
    neighborhood: &str,
    hours: (&str, &str),
    seed: &str,
    plan: (&str, DateTime<Utc>),
    location: GeoPoint,
) -> User {
    User {
        id: id.into(),
        email: email.into(),
        name: name.into(),
        role: UserRole::Shop,
        shop_name: Some(name.into()),
        address: Some(address.into()),
        phone: Some(phone.into()),
        neighborhood: Some(neighborhood.into()),
        open_time: Some(hours.0.into()),
        close_time: Some(hours.1.into()),
        logo_url: Some(format!(
            "https://api.dicebear.com/7.x/identicon/svg?seed={seed}"
        )),
        location: Some(location),
        plan: Some(plan.0.into()),
        plan_expires_at: Some(plan.1),
    }
}

fn mock_shops(now: DateTime<Utc>) -> Vec<User> {
    vec![
        shop(
            "shop1",
            "tech@akira.com",
            "CyberTech Store",
            "Av. Paulista, 1000",
            "(11) 9999-8888",
            "Bela Vista",
            ("08:00", "22:00"),
            "CyberTech",
            ("monthly", now + Duration::days(5)),
            GeoPoint {
                lat: -23.5657,
                lng: -46.6514,
            },
        ),
        shop(
            "shop2",
            "fashion@akira.com",
            "Neon Fashion",
            "Rua Augusta, 500",
            "(11) 7777-6666",
            "Consolação",
            ("10:00", "20:00"),
            "Neon",
            ("package_90", now + Duration::days(80)),
            GeoPoint {
                lat: -23.5505,
                lng: -46.6559,
            },
        ),
    ]
}

fn mock_products(now: DateTime<Utc>) -> Vec<Product> {
    vec![
        Product {
            id: "p1".into(),
            shop_id: "shop1".into(),
            shop_name: "CyberTech Store".into(),
            title: "Cyber Deck 2024".into(),
            description: "Computador portátil de alta performance.".into(),
            price: Decimal::new(450_000, 2),
            image_url: "https://picsum.photos/400/300?random=1".into(),
            category: "Informática".into(),
            brand: Some("Arasaka".into()),
            model: Some("MK-IV".into()),
            views: 120,
            likes: 45,
            created_at: now,
        },
        Product {
            id: "p2".into(),
            shop_id: "shop2".into(),
            shop_name: "Neon Fashion".into(),
            title: "Jaqueta Led".into(),
            description: "Jaqueta com iluminação RGB controlada por app.".into(),
            price: Decimal::new(35_000, 2),
            image_url: "https://picsum.photos/400/300?random=2".into(),
            category: "Moda Masculina".into(),
            brand: Some("Tyrell".into()),
            model: Some("Nexus-6".into()),
            views: 89,
            likes: 22,
            created_at: now,
        },
    ]
}

fn mock_orders(now: DateTime<Utc>) -> Vec<Order> {
    vec![Order {
        id: "o1".into(),
        buyer_id: "user1".into(),
        shop_id: "shop1".into(),
        product_id: "p1".into(),
        product_title: "Cyber Deck 2024".into(),
        product_image: "https://picsum.photos/400/300?random=1".into(),
        price: Decimal::new(450_000, 2),
        status: OrderStatus::Delivered,
        created_at: now - Duration::days(5),
    }]
}
