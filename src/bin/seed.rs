//! Pushes the demo catalog into the configured table store.

use std::path::Path;

use chrono::Utc;
use marketplace_api::{
    config::{AppConfig, BackendConfig},
    db::{MIGRATIONS_DIR, run_migrations},
    market::MarketState,
    persistence::{
        PersistenceError, TableStore, connect,
        orm::OrmTableStore,
        rows::ProfileRow,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();
    let config = AppConfig::from_env()?;

    if let BackendConfig::Postgres { database_url } = &config.backend {
        // Ensure migrations are applied.
        let orm = OrmTableStore::connect(database_url).await?;
        run_migrations(orm.connection(), Path::new(MIGRATIONS_DIR)).await?;
    }
    let Some(store) = connect(&config.backend).await? else {
        anyhow::bail!("no table store configured; set TABLE_STORE_URL/TABLE_STORE_KEY or DATABASE_URL");
    };

    let now = Utc::now();
    let seed = MarketState::seeded(now);
    let mut inserted = 0;

    for category in &seed.categories {
        inserted += report("category", &category.id, store.insert_category(&category.into()).await);
    }
    for shop in &seed.profiles {
        inserted += report("profile", &shop.id, store.insert_profile(&ProfileRow::from_user(shop, now)).await);
    }
    for product in &seed.products {
        inserted += report("product", &product.id, store.insert_product(&product.into()).await);
    }
    for order in &seed.orders {
        inserted += report("order", &order.id, store.insert_order(&order.into()).await);
    }

    println!("Seed completed on {}: {inserted} rows inserted", store.name());
    Ok(())
}

/// Existing rows are reported and skipped so the seed can be rerun.
fn report(kind: &str, id: &str, result: Result<(), PersistenceError>) -> usize {
    match result {
        Ok(()) => {
            println!("Inserted {kind} {id}");
            1
        }
        Err(err) => {
            tracing::warn!(kind, id, error = %err, "skipped");
            0
        }
    }
}
