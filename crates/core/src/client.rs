//! Transport contract used by every adapter.
//!
//! Adapters only describe a path, query parameters and the response shape.
//! Retries and backoff belong to the [`Transport`] implementation, not to the
//! adapters.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::errors::TransportError;

/// Default timeout for remote calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw GET transport against a configured base URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET and returns the response body on a 2xx status.
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
        headers: &BTreeMap<String, String>,
    ) -> Result<String, TransportError>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
        headers: &BTreeMap<String, String>,
    ) -> Result<String, TransportError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url).query(query);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| TransportError::Request {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TransportError::Request {
            url: url.clone(),
            message: format!("failed to read body: {}", e),
        })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(body)
    }
}

/// Offline transport answering from registered fixtures.
///
/// A fixture is looked up first by `path?k=v&...` (query in request order),
/// then by the bare path. Unknown paths fail with
/// [`TransportError::NoFixture`].
#[derive(Debug, Default)]
pub struct StaticTransport {
    fixtures: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, body: impl Into<String>) -> Self {
        self.fixtures.insert(key.to_string(), body.into());
        self
    }

    /// Request keys seen so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn key(path: &str, query: &[(&str, String)]) -> String {
        if query.is_empty() {
            return path.to_string();
        }
        let params = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", path, params)
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
        _headers: &BTreeMap<String, String>,
    ) -> Result<String, TransportError> {
        let key = Self::key(path, query);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(key.clone());
        }
        self.fixtures
            .get(&key)
            .or_else(|| self.fixtures.get(path))
            .cloned()
            .ok_or(TransportError::NoFixture(key))
    }
}

/// JSON client shared by an adapter: a transport plus default headers.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    headers: BTreeMap<String, String>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            headers: BTreeMap::new(),
        }
    }

    /// Client over [`HttpTransport`] for the given base URL.
    pub fn http(base_url: &str) -> Self {
        Self::new(Arc::new(HttpTransport::new(base_url)))
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// GETs `path` and decodes the JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TransportError> {
        let body = self.transport.get(path, query, &self.headers).await?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}
