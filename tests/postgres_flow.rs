use std::{path::Path, sync::Arc};

use marketplace_api::{
    db::{MIGRATIONS_DIR, run_migrations},
    market::sync::SyncState,
    models::{NewProduct, UserRole},
    persistence::orm::OrmTableStore,
    store::Store,
};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Statement};

// Integration flow: a new shop lists an item and a fresh process loads both back.
#[tokio::test]
async fn listing_survives_a_reload() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run database flow tests."
            );
            return Ok(());
        }
    };

    let backend = OrmTableStore::connect(&database_url).await?;
    run_migrations(backend.connection(), Path::new(MIGRATIONS_DIR)).await?;
    backend
        .connection()
        .execute(Statement::from_string(
            backend.connection().get_database_backend(),
            "TRUNCATE TABLE chat_messages, orders, products, categories, profiles CASCADE",
        ))
        .await?;
    let backend = Arc::new(backend);

    let store = Store::bootstrap(Some(backend.clone())).await;
    let login = store.login("11912345678", UserRole::Shop, None).await;
    assert!(matches!(login.sync, Some(SyncState::Synced { .. })));
    let shop = login.value.user;

    let listed = store
        .add_product(
            Some(&shop.id),
            NewProduct {
                title: "Console Retro".into(),
                description: "Com dois controles".into(),
                price: Decimal::new(75_050, 2),
                image_url: String::new(),
                category: "Outros".into(),
                brand: Some("Segata".into()),
                model: None,
            },
        )
        .await;
    let product = listed.value?;
    assert!(matches!(listed.sync, Some(SyncState::Synced { .. })));
    store.like_product(&product.id).await.value?;

    let reloaded = Store::bootstrap(Some(backend)).await;
    let (found, shop_known, categories) = reloaded
        .read(|m| {
            (
                m.product(&product.id).cloned(),
                m.shop(&shop.id).is_some(),
                m.categories.len(),
            )
        })
        .await;
    let found = found.expect("product persisted");
    assert_eq!(found.title, "Console Retro");
    assert_eq!(found.price, Decimal::new(75_050, 2));
    assert_eq!(found.likes, 1);
    assert!(shop_known);
    assert_eq!(categories, 9);

    Ok(())
}
