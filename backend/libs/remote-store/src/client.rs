//! Shared handle to the hosted data endpoint

use crate::config::RemoteStoreConfig;
use crate::error::{Result, StoreError};
use crate::query::TableQuery;
use crate::storage::Storage;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct RemoteStore {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    base_url: String,
}

impl std::fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStore")
            .field("base_url", &self.inner.base_url)
            .finish()
    }
}

impl RemoteStore {
    /// Build a handle. Fails only on invalid configuration; no request is made.
    pub fn new(config: &RemoteStoreConfig) -> Result<Self> {
        config.validate().map_err(StoreError::InvalidConfig)?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| StoreError::InvalidConfig(format!("anon key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| StoreError::InvalidConfig(format!("anon key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Start a query against `table`
    pub fn from(&self, table: &str) -> TableQuery {
        TableQuery::new(self.clone(), table)
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.clone())
    }

    /// Call a server-side procedure and decode its result
    pub async fn rpc<A, T>(&self, function: &str, args: &A) -> Result<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_rpc(function, args).await?;
        decode_json(response).await
    }

    /// Call a server-side procedure that returns nothing useful
    pub async fn rpc_void<A>(&self, function: &str, args: &A) -> Result<()>
    where
        A: Serialize + ?Sized,
    {
        self.send_rpc(function, args).await.map(|_| ())
    }

    async fn send_rpc<A>(&self, function: &str, args: &A) -> Result<Response>
    where
        A: Serialize + ?Sized,
    {
        let url = self.rest_url(&format!("rpc/{}", function));
        debug!(function, "Calling remote procedure");
        let response = self.request(Method::POST, &url).json(args).send().await?;
        check(response).await
    }

    /// Cheap request proving the endpoint answers with this key
    pub async fn probe(&self) -> Result<()> {
        let response = self
            .request(Method::GET, &self.rest_url(""))
            .send()
            .await?;
        check(response).await.map(|_| ())
    }

    pub(crate) fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.inner.base_url, path)
    }

    pub(crate) fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.inner.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.inner.http.request(method, url)
    }
}

/// Turn non-success responses into `StoreError::Remote`
pub(crate) async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StoreError::from_response_body(status.as_u16(), &body))
}

pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
}
