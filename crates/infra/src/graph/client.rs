//! Microsoft Graph management API client.
//!
//! Implements the core `ManagementApi` port: attaches a bearer token from
//! the session provider to every request, mirrors one `"{METHOD}: {url}"`
//! line per outbound request to the progress sink, and folds rejected
//! writes into `RemoteWrite` errors carrying the destination's status and
//! body.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tenantshift_core::ports::{AccessTokenProvider, ManagementApi, NoopProgressSink, ProgressSink};
use tenantshift_domain::{
    CreatedObject, GraphApiConfig, GraphCollection, Result, TenantShiftError,
};
use tracing::debug;

use crate::errors::InfraError;
use crate::http::HttpClient;

// Import write counts are observable behavior (at most one dependent
// attempt, exactly two conditional-access attempts); never retry writes.
const WRITE_ATTEMPTS: usize = 1;
const READ_ATTEMPTS: usize = 3;

/// Collection envelope returned by list endpoints.
#[derive(Debug, Deserialize)]
struct ODataCollection {
    #[serde(default)]
    value: Vec<Value>,
}

/// HTTP client for the destination management API.
#[derive(Clone)]
pub struct GraphClient {
    base_url: String,
    reads: HttpClient,
    writes: HttpClient,
    tokens: Arc<dyn AccessTokenProvider>,
    progress: Arc<dyn ProgressSink>,
}

impl GraphClient {
    /// Create a client without progress notification.
    pub fn new(config: GraphApiConfig, tokens: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        Self::with_progress_sink(config, tokens, Arc::new(NoopProgressSink))
    }

    /// Create a client that mirrors request lines to the given sink.
    ///
    /// # Errors
    /// Returns `Config` when the base URL is malformed or the underlying
    /// HTTP clients cannot be built.
    pub fn with_progress_sink(
        config: GraphApiConfig,
        tokens: Arc<dyn AccessTokenProvider>,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Self> {
        url::Url::parse(&config.base_url).map_err(|_| {
            TenantShiftError::Config(format!("invalid base URL: {}", config.base_url))
        })?;

        let reads = HttpClient::builder().max_attempts(READ_ATTEMPTS).build()?;
        let writes = HttpClient::builder().max_attempts(WRITE_ATTEMPTS).build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { base_url, reads, writes, tokens, progress })
    }

    fn collection_url(&self, collection: GraphCollection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    /// Mirror the request line to the observing client, if any. Fire and
    /// forget: a lost progress line never affects the request itself.
    async fn notify(&self, session: Option<&str>, method: &Method, url: &str) {
        let Some(client_id) = session else { return };
        if let Err(error) = self.progress.publish(client_id, &format!("{method}: {url}")).await {
            debug!(%error, "progress notification dropped");
        }
    }

    async fn get(&self, url: &str, session: Option<&str>) -> Result<Response> {
        let token = self.tokens.access_token().await?;
        self.notify(session, &Method::GET, url).await;
        let response =
            self.reads.send(self.reads.request(Method::GET, url).bearer_auth(token)).await?;
        Self::expect_read_success(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        payload: &Value,
        session: Option<&str>,
    ) -> Result<Response> {
        let token = self.tokens.access_token().await?;
        self.notify(session, &Method::POST, url).await;
        let response = self
            .writes
            .send(self.writes.request(Method::POST, url).bearer_auth(token).json(payload))
            .await?;
        Self::expect_write_success(response).await
    }

    async fn expect_write_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(TenantShiftError::RemoteWrite { status: status.as_u16(), body })
    }

    async fn expect_read_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(read_failure(status, body))
    }
}

fn read_failure(status: StatusCode, body: String) -> TenantShiftError {
    let message = format!("HTTP {}: {}", status.as_u16(), body);
    match status.as_u16() {
        401 | 403 => TenantShiftError::Auth(message),
        404 => TenantShiftError::NotFound(message),
        400..=499 => TenantShiftError::InvalidInput(message),
        _ => TenantShiftError::Network(message),
    }
}

fn decode_error(context: &str, err: reqwest::Error) -> TenantShiftError {
    debug!(error = %err, context, "failed to decode response");
    TenantShiftError::from(InfraError::from(err))
}

#[async_trait]
impl ManagementApi for GraphClient {
    async fn create(
        &self,
        collection: GraphCollection,
        payload: &Value,
        session: Option<&str>,
    ) -> Result<CreatedObject> {
        let url = self.collection_url(collection);
        let response = self.post_json(&url, payload, session).await?;
        response
            .json::<CreatedObject>()
            .await
            .map_err(|e| TenantShiftError::Parse(format!("malformed creation response: {e}")))
    }

    async fn create_raw(
        &self,
        collection: GraphCollection,
        body: String,
        session: Option<&str>,
    ) -> Result<String> {
        let url = self.collection_url(collection);
        let token = self.tokens.access_token().await?;
        self.notify(session, &Method::POST, &url).await;

        let request = self
            .writes
            .request(Method::POST, &url)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        let response = Self::expect_write_success(self.writes.send(request).await?).await?;

        response.text().await.map_err(|e| decode_error("create_raw", e))
    }

    async fn assign_target_apps(
        &self,
        collection: GraphCollection,
        id: &str,
        payload: &Value,
        session: Option<&str>,
    ) -> Result<()> {
        let url = format!("{}/{}/targetApps", self.collection_url(collection), id);
        self.post_json(&url, payload, session).await.map(drop)
    }

    async fn list(&self, collection: GraphCollection, session: Option<&str>) -> Result<Vec<Value>> {
        let url = self.collection_url(collection);
        let response = self.get(&url, session).await?;
        let envelope: ODataCollection = response
            .json()
            .await
            .map_err(|e| TenantShiftError::Parse(format!("malformed collection response: {e}")))?;
        Ok(envelope.value)
    }

    async fn fetch_raw(
        &self,
        collection: GraphCollection,
        id: Option<&str>,
        session: Option<&str>,
    ) -> Result<String> {
        let url = match id {
            Some(id) => format!("{}/{}", self.collection_url(collection), id),
            None => self.collection_url(collection),
        };
        let response = self.get(&url, session).await?;
        response.text().await.map_err(|e| decode_error("fetch_raw", e))
    }

    async fn fetch_assigned_apps(
        &self,
        collection: GraphCollection,
        id: &str,
        session: Option<&str>,
    ) -> Result<Vec<Value>> {
        let url = format!("{}/{}/apps", self.collection_url(collection), id);
        let response = self.get(&url, session).await?;
        let envelope: ODataCollection = response
            .json()
            .await
            .map_err(|e| TenantShiftError::Parse(format!("malformed apps response: {e}")))?;
        Ok(envelope.value)
    }
}
