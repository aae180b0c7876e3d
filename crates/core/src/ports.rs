//! Port interfaces implemented by the infrastructure layer

use async_trait::async_trait;
use serde_json::Value;
use tenantshift_domain::{CreatedObject, GraphCollection, Result};

/// Provides bearer tokens for destination API calls.
///
/// Implementations cache the session's token material and refresh it
/// silently when it is about to expire.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Retrieve a valid access token for the destination API.
    async fn access_token(&self) -> Result<String>;
}

/// Typed surface of the destination management API.
///
/// Every method takes the optional progress-notification handle; when it is
/// present the implementation mirrors one `"{METHOD}: {url}"` line per
/// outbound request to the observing client.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Create an object in a collection and decode the creation response.
    async fn create(
        &self,
        collection: GraphCollection,
        payload: &Value,
        session: Option<&str>,
    ) -> Result<CreatedObject>;

    /// Create an object from a pre-serialized body, returning the response
    /// body verbatim.
    async fn create_raw(
        &self,
        collection: GraphCollection,
        body: String,
        session: Option<&str>,
    ) -> Result<String>;

    /// Issue the dependent `targetApps` write scoped to a created object.
    async fn assign_target_apps(
        &self,
        collection: GraphCollection,
        id: &str,
        payload: &Value,
        session: Option<&str>,
    ) -> Result<()>;

    /// List the objects of a collection.
    async fn list(&self, collection: GraphCollection, session: Option<&str>) -> Result<Vec<Value>>;

    /// Fetch a collection (or a single object when `id` is given) as raw
    /// response text.
    async fn fetch_raw(
        &self,
        collection: GraphCollection,
        id: Option<&str>,
        session: Option<&str>,
    ) -> Result<String>;

    /// Fetch the apps currently targeted by an app-management policy.
    async fn fetch_assigned_apps(
        &self,
        collection: GraphCollection,
        id: &str,
        session: Option<&str>,
    ) -> Result<Vec<Value>>;
}

/// Best-effort sink for progress notification lines.
///
/// Never on the critical path: callers drop publish failures.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Deliver one request line to the observing client.
    async fn publish(&self, client_id: &str, line: &str) -> Result<()>;
}

/// Default sink that discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressSink;

#[async_trait]
impl ProgressSink for NoopProgressSink {
    async fn publish(&self, _client_id: &str, _line: &str) -> Result<()> {
        Ok(())
    }
}
