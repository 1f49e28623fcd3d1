//! PostgREST-style HTTP table API (the hosted table store).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Url,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::{
    PersistenceError, TableStore,
    rows::{
        CategoryRow, ChatMessageRow, CounterPatchRow, OrderRow, ProductRow, ProfilePatchRow,
        ProfileRow,
    },
};
use crate::market::sync::Table;

const REST_PATH: &str = "rest/v1";

#[derive(Debug, Clone)]
pub struct RestTableStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestTableStore {
    /// `url` is the project URL; `key` is sent both as `apikey` and bearer token.
    pub fn new(url: &str, key: &str) -> Result<Self, PersistenceError> {
        let invalid_key =
            |e: reqwest::header::InvalidHeaderValue| PersistenceError::Config(format!("invalid key: {e}"));
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid_key)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| PersistenceError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: format!("{}/{REST_PATH}", url.trim_end_matches('/')),
        })
    }

    /// Table endpoint with PostgREST query parameters appended.
    fn table_url(&self, table: Table, params: &[(&str, &str)]) -> Result<Url, PersistenceError> {
        let endpoint = format!("{}/{}", self.base_url, table.as_str());
        Url::parse_with_params(&endpoint, params)
            .map_err(|e| PersistenceError::Config(format!("invalid table store url: {e}")))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: Table,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, PersistenceError> {
        let params: Vec<(&str, &str)> = std::iter::once(("select", "*"))
            .chain(query.iter().copied())
            .collect();
        let response = self
            .client
            .get(self.table_url(table, &params)?)
            .send()
            .await
            .map_err(|source| PersistenceError::Http { table, source })?;
        let body = checked_body(table, response).await?;
        serde_json::from_str(&body).map_err(|source| PersistenceError::Decode { table, source })
    }

    async fn insert<T: Serialize + Sync>(&self, table: Table, row: &T) -> Result<(), PersistenceError> {
        let response = self
            .client
            .post(self.table_url(table, &[])?)
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await
            .map_err(|source| PersistenceError::Http { table, source })?;
        checked_body(table, response).await.map(|_| ())
    }

    async fn update<T: Serialize + Sync>(
        &self,
        table: Table,
        id: &str,
        patch: &T,
    ) -> Result<(), PersistenceError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .patch(self.table_url(table, &[("id", filter.as_str())])?)
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await
            .map_err(|source| PersistenceError::Http { table, source })?;
        checked_body(table, response).await.map(|_| ())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), PersistenceError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .delete(self.table_url(table, &[("id", filter.as_str())])?)
            .send()
            .await
            .map_err(|source| PersistenceError::Http { table, source })?;
        checked_body(table, response).await.map(|_| ())
    }
}

async fn checked_body(table: Table, response: reqwest::Response) -> Result<String, PersistenceError> {
    let status = response.status();
    debug!(%table, status = %status, "table store response");
    let body = response
        .text()
        .await
        .map_err(|source| PersistenceError::Http { table, source })?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(PersistenceError::Status {
            table,
            status: status.as_u16(),
            body,
        })
    }
}

/// Double-quotes a filter value so reserved characters (`,.:()` and spaces)
/// are taken literally.
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

#[async_trait]
impl TableStore for RestTableStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn list_profiles_by_role(&self, role: &str) -> Result<Vec<ProfileRow>, PersistenceError> {
        let filter = format!("eq.{role}");
        self.select(Table::Profiles, &[("role", filter.as_str())]).await
    }

    async fn find_profile(&self, identifier: &str) -> Result<Option<ProfileRow>, PersistenceError> {
        let value = quoted(identifier);
        let filter = format!("(email.eq.{value},phone.eq.{value})");
        let rows: Vec<ProfileRow> = self
            .select(Table::Profiles, &[("or", filter.as_str()), ("limit", "1")])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_profile(&self, row: &ProfileRow) -> Result<(), PersistenceError> {
        self.insert(Table::Profiles, row).await
    }

    async fn update_profile(&self, id: &str, patch: &ProfilePatchRow) -> Result<(), PersistenceError> {
        self.update(Table::Profiles, id, patch).await
    }

    async fn list_products(&self) -> Result<Vec<ProductRow>, PersistenceError> {
        self.select(Table::Products, &[("order", "created_at.desc")]).await
    }

    async fn insert_product(&self, row: &ProductRow) -> Result<(), PersistenceError> {
        self.insert(Table::Products, row).await
    }

    async fn update_product_counters(
        &self,
        id: &str,
        patch: &CounterPatchRow,
    ) -> Result<(), PersistenceError> {
        self.update(Table::Products, id, patch).await
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRow>, PersistenceError> {
        self.select(Table::Categories, &[]).await
    }

    async fn insert_category(&self, row: &CategoryRow) -> Result<(), PersistenceError> {
        self.insert(Table::Categories, row).await
    }

    async fn delete_category(&self, id: &str) -> Result<(), PersistenceError> {
        self.delete(Table::Categories, id).await
    }

    async fn list_chat_messages(&self) -> Result<Vec<ChatMessageRow>, PersistenceError> {
        self.select(Table::ChatMessages, &[("order", "created_at.asc")]).await
    }

    async fn insert_chat_message(&self, row: &ChatMessageRow) -> Result<(), PersistenceError> {
        self.insert(Table::ChatMessages, row).await
    }

    async fn list_orders(&self) -> Result<Vec<OrderRow>, PersistenceError> {
        self.select(Table::Orders, &[("order", "created_at.desc")]).await
    }

    async fn insert_order(&self, row: &OrderRow) -> Result<(), PersistenceError> {
        self.insert(Table::Orders, row).await
    }
}

#[cfg(test)]
mod tests {
    use super::quoted;

    #[test]
    fn filter_values_are_quoted_and_escaped() {
        assert_eq!(quoted("(11) 9999-8888"), r#""(11) 9999-8888""#);
        assert_eq!(quoted("a,b"), r#""a,b""#);
        assert_eq!(quoted(r#"say "hi"\"#), r#""say \"hi\"\\""#);
    }
}
