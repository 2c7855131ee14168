//! Table query builder following the PostgREST convention
//!
//! Filters become query parameters (`news_id=eq.<id>`, `parent_id=is.null`),
//! ordering becomes `order=created_at.desc`, and counts are requested with
//! `Prefer: count=exact` on a HEAD request, read back from `Content-Range`.

use crate::client::{check, decode_json, RemoteStore};
use crate::error::{Result, StoreError};
use reqwest::header::CONTENT_RANGE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn suffix(self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

pub struct TableQuery {
    store: RemoteStore,
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
}

impl TableQuery {
    pub(crate) fn new(store: RemoteStore, table: &str) -> Self {
        Self {
            store,
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn eq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "eq", value)
    }

    pub fn neq(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "neq", value)
    }

    pub fn gte(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "gte", value)
    }

    pub fn lt(self, column: &str, value: impl ToString) -> Self {
        self.filter(column, "lt", value)
    }

    pub fn is_null(self, column: &str) -> Self {
        self.filter(column, "is", "null")
    }

    fn filter(mut self, column: &str, op: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("{}.{}", op, value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order.push(format!("{}.{}", column, order.suffix()));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters for a read, in a stable order
    pub(crate) fn read_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    fn url(&self) -> String {
        self.store.rest_url(&self.table)
    }

    /// Fetch all matching rows
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        debug!(table = %self.table, filters = self.filters.len(), "Selecting rows");
        let response = self
            .store
            .request(Method::GET, &self.url())
            .query(&self.read_params())
            .send()
            .await?;
        decode_json(check(response).await?).await
    }

    /// Fetch the first matching row, if any
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let rows: Vec<T> = self.limit(1).fetch().await?;
        Ok(rows.into_iter().next())
    }

    /// Exact number of matching rows, without transferring them
    pub async fn count(self) -> Result<u64> {
        let mut params = self.read_params();
        params.retain(|(key, _)| key != "order" && key != "limit");

        let response = self
            .store
            .request(Method::HEAD, &self.url())
            .query(&params)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = check(response).await?;

        let range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::Decode("missing Content-Range header".to_string()))?;
        parse_content_range_total(range)
    }

    /// Insert rows and return them as stored
    pub async fn insert<B, T>(self, rows: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table = %self.table, "Inserting rows");
        let response = self
            .store
            .request(Method::POST, &self.url())
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        decode_json(check(response).await?).await
    }

    /// Update every row matching the filters and return the updated rows
    pub async fn update<B, T>(self, patch: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.ensure_filtered("update")?;
        debug!(table = %self.table, "Updating rows");
        let response = self
            .store
            .request(Method::PATCH, &self.url())
            .query(&self.filters)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        decode_json(check(response).await?).await
    }

    /// Delete every row matching the filters and return the deleted rows
    pub async fn delete<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        self.ensure_filtered("delete")?;
        debug!(table = %self.table, "Deleting rows");
        let response = self
            .store
            .request(Method::DELETE, &self.url())
            .query(&self.filters)
            .header("Prefer", "return=representation")
            .send()
            .await?;
        decode_json(check(response).await?).await
    }

    /// Unfiltered writes would touch the whole table
    fn ensure_filtered(&self, operation: &str) -> Result<()> {
        if self.filters.is_empty() {
            return Err(StoreError::InvalidConfig(format!(
                "refusing unfiltered {} on '{}'",
                operation, self.table
            )));
        }
        Ok(())
    }
}

/// `0-9/42` → 42, `*/0` → 0
pub(crate) fn parse_content_range_total(range: &str) -> Result<u64> {
    let total = range
        .rsplit_once('/')
        .map(|(_, total)| total.trim())
        .ok_or_else(|| StoreError::Decode(format!("malformed Content-Range '{}'", range)))?;

    total
        .parse()
        .map_err(|_| StoreError::Decode(format!("Content-Range total unknown in '{}'", range)))
}
