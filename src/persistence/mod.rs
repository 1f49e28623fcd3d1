//! Remote table-store boundary.
//!
//! The store mirrors local commits through [`TableStore`]. Two backends exist:
//! a PostgREST-style HTTP table API and a direct Postgres connection through
//! SeaORM. Without either, the service runs on mock data.

pub mod orm;
pub mod rest;
pub mod rows;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{config::BackendConfig, market::sync::Table};
use rows::{
    CategoryRow, ChatMessageRow, CounterPatchRow, OrderRow, ProductRow, ProfilePatchRow,
    ProfileRow,
};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("request to {table} failed: {source}")]
    Http {
        table: Table,
        #[source]
        source: reqwest::Error,
    },

    #[error("{table} responded with {status}: {body}")]
    Status {
        table: Table,
        status: u16,
        body: String,
    },

    #[error("invalid {table} row: {source}")]
    Decode {
        table: Table,
        #[source]
        source: serde_json::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("invalid table store configuration: {0}")]
    Config(String),
}

/// Row-level CRUD over the marketplace tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Short backend label used in logs and the sync report.
    fn name(&self) -> &'static str;

    async fn list_profiles_by_role(&self, role: &str) -> Result<Vec<ProfileRow>, PersistenceError>;
    /// Profile whose email or phone equals `identifier`.
    async fn find_profile(&self, identifier: &str) -> Result<Option<ProfileRow>, PersistenceError>;
    async fn insert_profile(&self, row: &ProfileRow) -> Result<(), PersistenceError>;
    async fn update_profile(&self, id: &str, patch: &ProfilePatchRow) -> Result<(), PersistenceError>;

    /// Newest first.
    async fn list_products(&self) -> Result<Vec<ProductRow>, PersistenceError>;
    async fn insert_product(&self, row: &ProductRow) -> Result<(), PersistenceError>;
    async fn update_product_counters(
        &self,
        id: &str,
        patch: &CounterPatchRow,
    ) -> Result<(), PersistenceError>;

    async fn list_categories(&self) -> Result<Vec<CategoryRow>, PersistenceError>;
    async fn insert_category(&self, row: &CategoryRow) -> Result<(), PersistenceError>;
    async fn delete_category(&self, id: &str) -> Result<(), PersistenceError>;

    /// Oldest first.
    async fn list_chat_messages(&self) -> Result<Vec<ChatMessageRow>, PersistenceError>;
    async fn insert_chat_message(&self, row: &ChatMessageRow) -> Result<(), PersistenceError>;

    /// Newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRow>, PersistenceError>;
    async fn insert_order(&self, row: &OrderRow) -> Result<(), PersistenceError>;
}

pub type SharedTableStore = Arc<dyn TableStore>;

/// Builds the configured backend, or `None` for mock mode.
pub async fn connect(config: &BackendConfig) -> Result<Option<SharedTableStore>, PersistenceError> {
    match config {
        BackendConfig::Mock => Ok(None),
        BackendConfig::Rest { url, key } => {
            let store = rest::RestTableStore::new(url, key)?;
            Ok(Some(Arc::new(store)))
        }
        BackendConfig::Postgres { database_url } => {
            let store = orm::OrmTableStore::connect(database_url).await?;
            Ok(Some(Arc::new(store)))
        }
    }
}
