use std::sync::Arc;

use chrono::{Duration, Utc};
use marketplace_api::{
    market::{CatalogFilter, Ignored, MarketState, sync::SyncState},
    models::{NewProduct, UserRole},
    persistence::rest::RestTableStore,
    policy::SubscriptionStatus,
    store::Store,
};
use rust_decimal::Decimal;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn listing(title: &str) -> NewProduct {
    NewProduct {
        title: title.to_string(),
        description: "Usado, bom estado".to_string(),
        price: Decimal::new(12990, 2),
        image_url: "https://picsum.photos/400".to_string(),
        category: "Informática".to_string(),
        brand: Some("Ono".to_string()),
        model: Some("Sendai-7".to_string()),
    }
}

#[tokio::test]
async fn likes_and_views_never_decrease() {
    let store = Store::mock();
    let before = store.read(|m| m.product("p1").cloned()).await.unwrap();

    for _ in 0..3 {
        store.like_product("p1").await.value.unwrap();
        store.view_product("p1").await.value.unwrap();
    }

    let after = store.read(|m| m.product("p1").cloned()).await.unwrap();
    assert_eq!(after.likes, before.likes + 3);
    assert_eq!(after.views, before.views + 3);

    let missing = store.like_product("nope").await;
    assert_eq!(missing.value, Err(Ignored::UnknownProduct));
    assert!(missing.sync.is_none());
}

#[tokio::test]
async fn non_shop_cannot_list_items() {
    let store = Store::mock();
    let session = store.login("11988887777", UserRole::User, None).await.value;
    let count = store.read(|m| m.products.len()).await;

    let result = store.add_product(Some(&session.user.id), listing("Teclado")).await;
    assert_eq!(result.value, Err(Ignored::NotAShop));
    assert!(result.sync.is_none());
    assert_eq!(store.read(|m| m.products.len()).await, count);

    let anonymous = store.add_product(None, listing("Teclado")).await;
    assert_eq!(anonymous.value, Err(Ignored::NoSession));
}

#[tokio::test]
async fn monthly_plan_blocks_the_twenty_first_item() {
    let store = Store::new(MarketState::new(), None);
    let shop = store.login("11911112222", UserRole::Shop, None).await.value.user;
    store.upgrade_plan(Some(&shop.id), "monthly").await.value.unwrap();

    for n in 0..20 {
        store
            .add_product(Some(&shop.id), listing(&format!("Item {n}")))
            .await
            .value
            .unwrap();
    }

    let user = store.read(|m| m.profile(&shop.id).cloned()).await.unwrap();
    let status = SubscriptionStatus::compute(&user, 20, Utc::now());
    assert!(status.is_limit_reached);

    let blocked = store.add_product(Some(&shop.id), listing("Item 21")).await;
    assert_eq!(blocked.value, Err(Ignored::LimitReached));
    assert_eq!(store.read(|m| m.count_products_of(&shop.id)).await, 20);
}

#[tokio::test]
async fn first_upgrade_gets_the_trial_bonus() {
    let store = Store::new(MarketState::new(), None);
    let buyer = store.login("11933334444", UserRole::User, None).await.value.user;
    assert!(buyer.plan.is_none());

    let upgraded = store.upgrade_plan(Some(&buyer.id), "monthly").await.value.unwrap();
    let days = (upgraded.plan_expires_at.unwrap() - Utc::now()).num_days();
    assert!((59..=60).contains(&days), "got {days}");

    let renewed = store.upgrade_plan(Some(&buyer.id), "monthly").await.value.unwrap();
    let days = (renewed.plan_expires_at.unwrap() - Utc::now()).num_days();
    assert!((29..=30).contains(&days), "got {days}");

    let unknown = store.upgrade_plan(Some(&buyer.id), "gold").await;
    assert_eq!(unknown.value, Err(Ignored::UnknownPlan));
}

#[tokio::test]
async fn listed_item_reads_back_unchanged() {
    let store = Store::mock();
    let shop = store.login("tech@akira.com", UserRole::Shop, None).await.value.user;
    assert_eq!(shop.id, "shop1");

    let created = store
        .add_product(Some(&shop.id), listing("Monitor Holo"))
        .await
        .value
        .unwrap();
    let input = listing("Monitor Holo");
    assert_eq!(created.title, input.title);
    assert_eq!(created.price, input.price);
    assert_eq!(created.category, input.category);
    assert_eq!(created.brand, input.brand);
    assert_eq!(created.model, input.model);
    assert_eq!((created.views, created.likes), (0, 0));

    let found = store
        .read(|m| {
            m.search(&CatalogFilter {
                category: None,
                query: Some("sendai".to_string()),
            })
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
        })
        .await;
    assert_eq!(found.first(), Some(&created));
    assert_eq!(found[0].shop_name, "CyberTech Store");
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let store = Store::mock();
    let session = store.login("11955556666", UserRole::User, None).await.value;
    assert!(store.session_user(&session.id).await.is_some());

    assert!(store.logout(&session.id).await);
    assert!(store.session_user(&session.id).await.is_none());
    assert!(!store.logout(&session.id).await);
}

#[tokio::test]
async fn mock_mode_marks_writes_local_only() {
    let store = Store::mock();
    let liked = store.like_product("p2").await;
    assert_eq!(liked.sync, Some(SyncState::LocalOnly));
    assert!(store.sync_report().await.failed.is_empty());
}

#[tokio::test]
async fn failed_remote_write_keeps_local_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let backend = RestTableStore::new(&server.uri(), "anon-key").unwrap();
    let store = Store::new(MarketState::seeded(Utc::now()), Some(Arc::new(backend)));
    let shop = store.login("tech@akira.com", UserRole::Shop, None).await.value.user;

    let result = store.add_product(Some(&shop.id), listing("Drone")).await;
    let product = result.value.unwrap();
    assert!(matches!(result.sync, Some(SyncState::Failed { .. })));
    assert!(store.read(|m| m.product(&product.id).is_some()).await);

    let report = store.sync_report().await;
    assert_eq!(report.backend, "rest");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].entity.id, product.id);
}

#[tokio::test]
async fn shop_profile_update_shows_in_directory() {
    let store = Store::mock();
    let shop = store.login("tech@akira.com", UserRole::Shop, None).await.value.user;

    let fields = marketplace_api::models::ProfileFields {
        shop_name: Some("CyberTech Prime".to_string()),
        neighborhood: Some(String::new()),
        ..Default::default()
    };
    let updated = store.update_user(Some(&shop.id), fields).await.value.unwrap();
    assert_eq!(updated.name, "CyberTech Prime");
    assert_eq!(updated.neighborhood.as_deref(), Some("Bela Vista"));

    let listed = store.read(|m| m.shop(&shop.id).cloned()).await.unwrap();
    assert_eq!(listed.shop_name.as_deref(), Some("CyberTech Prime"));
    assert!(listed.plan_expires_at.unwrap() > Utc::now() + Duration::days(4));
}
