//! In-memory mock for the management API port.
//!
//! Responses are scripted per method and popped in call order; every call is
//! recorded so tests can assert on write counts, ordering, and payloads.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tenantshift_core::ports::ManagementApi;
use tenantshift_domain::{CreatedObject, GraphCollection, Result};

/// One recorded call against the mock API.
#[derive(Debug, Clone)]
pub enum ApiCall {
    Create { collection: GraphCollection, payload: Value },
    CreateRaw { collection: GraphCollection, body: String },
    AssignTargetApps { collection: GraphCollection, id: String, payload: Value },
    List { collection: GraphCollection },
    FetchRaw { collection: GraphCollection, id: Option<String> },
    FetchAssignedApps { collection: GraphCollection, id: String },
}

/// Scriptable in-memory `ManagementApi`.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
    create_results: Mutex<VecDeque<Result<CreatedObject>>>,
    create_raw_results: Mutex<VecDeque<Result<String>>>,
    assign_results: Mutex<VecDeque<Result<()>>>,
    list_results: Mutex<VecDeque<Result<Vec<Value>>>>,
    fetch_raw_results: Mutex<VecDeque<Result<String>>>,
    fetch_apps_results: Mutex<VecDeque<Result<Vec<Value>>>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_create(&self, result: Result<CreatedObject>) {
        self.create_results.lock().unwrap().push_back(result);
    }

    pub fn queue_create_raw(&self, result: Result<String>) {
        self.create_raw_results.lock().unwrap().push_back(result);
    }

    pub fn queue_assign(&self, result: Result<()>) {
        self.assign_results.lock().unwrap().push_back(result);
    }

    pub fn queue_list(&self, result: Result<Vec<Value>>) {
        self.list_results.lock().unwrap().push_back(result);
    }

    pub fn queue_fetch_raw(&self, result: Result<String>) {
        self.fetch_raw_results.lock().unwrap().push_back(result);
    }

    pub fn queue_fetch_assigned_apps(&self, result: Result<Vec<Value>>) {
        self.fetch_apps_results.lock().unwrap().push_back(result);
    }

    /// Snapshot of every call made so far, in order.
    pub fn recorded(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T>>>, method: &str) -> Result<T> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted {method} response left"))
    }
}

/// A sample created-object response.
pub fn created(odata_type: Option<&str>, id: &str, display_name: &str) -> CreatedObject {
    CreatedObject {
        odata_type: odata_type.map(str::to_owned),
        id: id.to_string(),
        display_name: display_name.to_string(),
    }
}

#[async_trait]
impl ManagementApi for RecordingApi {
    async fn create(
        &self,
        collection: GraphCollection,
        payload: &Value,
        _session: Option<&str>,
    ) -> Result<CreatedObject> {
        self.record(ApiCall::Create { collection, payload: payload.clone() });
        Self::next(&self.create_results, "create")
    }

    async fn create_raw(
        &self,
        collection: GraphCollection,
        body: String,
        _session: Option<&str>,
    ) -> Result<String> {
        self.record(ApiCall::CreateRaw { collection, body });
        Self::next(&self.create_raw_results, "create_raw")
    }

    async fn assign_target_apps(
        &self,
        collection: GraphCollection,
        id: &str,
        payload: &Value,
        _session: Option<&str>,
    ) -> Result<()> {
        self.record(ApiCall::AssignTargetApps {
            collection,
            id: id.to_string(),
            payload: payload.clone(),
        });
        Self::next(&self.assign_results, "assign_target_apps")
    }

    async fn list(
        &self,
        collection: GraphCollection,
        _session: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.record(ApiCall::List { collection });
        Self::next(&self.list_results, "list")
    }

    async fn fetch_raw(
        &self,
        collection: GraphCollection,
        id: Option<&str>,
        _session: Option<&str>,
    ) -> Result<String> {
        self.record(ApiCall::FetchRaw { collection, id: id.map(str::to_owned) });
        Self::next(&self.fetch_raw_results, "fetch_raw")
    }

    async fn fetch_assigned_apps(
        &self,
        collection: GraphCollection,
        id: &str,
        _session: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.record(ApiCall::FetchAssignedApps { collection, id: id.to_string() });
        Self::next(&self.fetch_apps_results, "fetch_assigned_apps")
    }
}
