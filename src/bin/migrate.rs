use std::path::Path;

use anyhow::Context;
use marketplace_api::db::{MIGRATIONS_DIR, create_orm_conn, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let orm = create_orm_conn(&database_url).await?;
    let applied = run_migrations(&orm, Path::new(MIGRATIONS_DIR)).await?;
    println!("Migrations applied: {applied}");
    Ok(())
}
