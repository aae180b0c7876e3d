//! Managed-app assignment records for the dependent targeting write.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, TenantShiftError};

/// One entry of a policy's `assignedApps` list.
///
/// Deliberately opaque: the destination validates the app identifiers, not
/// us, so the record passes every field through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedMobileApp {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body of the dependent `targetApps` write: `{"apps": [...]}` scoped to a
/// freshly created policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppTargetRequest {
    pub apps: Vec<ManagedMobileApp>,
}

impl AppTargetRequest {
    /// Extract the `assignedApps` list from the original (pre-normalization)
    /// source document.
    pub fn from_document(document: &Value) -> Result<Self> {
        let assigned = document
            .get("assignedApps")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                TenantShiftError::InvalidInput("document has no assignedApps list".into())
            })?;

        let apps = assigned
            .iter()
            .map(|app| {
                serde_json::from_value(app.clone()).map_err(|e| {
                    TenantShiftError::Parse(format!("malformed assignedApps entry: {e}"))
                })
            })
            .collect::<Result<Vec<ManagedMobileApp>>>()?;

        Ok(Self { apps })
    }
}
