//! Import dispatch: classification, normalization, and the two-phase write.

use std::sync::Arc;

use serde_json::Value;
use tenantshift_domain::constants::SANITIZED_IMPORT_NOTICE;
use tenantshift_domain::{
    AppTargetRequest, ConditionalAccessPolicy, GraphCollection, ImportOutcome, Result,
    TenantShiftError,
};
use tracing::{debug, info, warn};

use super::{classifier, normalize};
use crate::ports::ManagementApi;

/// Imports exported configuration documents into the destination tenant.
///
/// Each import call is independent and the service holds no mutable state,
/// so one instance can serve concurrent imports of distinct documents.
pub struct ImportService {
    api: Arc<dyn ManagementApi>,
}

impl ImportService {
    /// Create a new import service over the destination API.
    pub fn new(api: Arc<dyn ManagementApi>) -> Self {
        Self { api }
    }

    /// Import one device-management configuration document.
    ///
    /// Classifies the document, normalizes it for re-creation, submits it to
    /// the kind-specific creation endpoint, and, for app-management kinds,
    /// issues the dependent `targetApps` write once the new identifier is
    /// known. The dependent write is best-effort: its failure never fails
    /// the import.
    ///
    /// Returns `Ok(None)` when the document's type is not handled; no write
    /// is issued in that case.
    ///
    /// # Errors
    /// `Parse` for malformed input, `Normalization` when the document does
    /// not match its kind's expected shape, `RemoteWrite` when the primary
    /// creation is rejected.
    pub async fn import_configuration(
        &self,
        document: &str,
        session: Option<&str>,
    ) -> Result<Option<ImportOutcome>> {
        let parsed: Value = serde_json::from_str(document)
            .map_err(|e| TenantShiftError::Parse(format!("invalid configuration document: {e}")))?;

        let kind = classifier::classify(&parsed)?;
        let Some(collection) = kind.collection() else {
            debug!("ignoring configuration document of unhandled type");
            return Ok(None);
        };

        let payload = normalize::normalize(kind, &parsed)?;
        let created = self.api.create(collection, &payload, session).await?;

        if kind.carries_assigned_apps() {
            // Losing the targeting write must not undo the import.
            best_effort(
                "target app assignment",
                self.push_target_apps(collection, &created.id, &parsed, session).await,
            );
        }

        let resource_type = kind
            .fixed_type_label()
            .map(str::to_owned)
            .or_else(|| created.odata_type.clone())
            .unwrap_or_default();

        let outcome = ImportOutcome::new(resource_type, created.display_name);
        info!(%outcome, "configuration document imported");
        Ok(Some(outcome))
    }

    /// Import a conditional-access policy.
    ///
    /// The policy is first submitted with its identifier cleared, its state
    /// forced to disabled, and its creation timestamp dropped. On any
    /// failure the source tenant's user/group/role/application references
    /// are scrubbed to the `"none"` sentinel and the policy is resubmitted
    /// exactly once; that result is final and, on success, prefixed with a
    /// note that unknown identifiers were removed.
    ///
    /// # Errors
    /// `Parse` for malformed input; the retry's `RemoteWrite`/`Network`
    /// failure when the sanitized resubmission is rejected too.
    pub async fn import_conditional_access(
        &self,
        document: &str,
        session: Option<&str>,
    ) -> Result<String> {
        let mut policy: ConditionalAccessPolicy = serde_json::from_str(document).map_err(|e| {
            TenantShiftError::Parse(format!("invalid conditional access policy: {e}"))
        })?;

        policy.disable_for_import();
        let first_attempt = self
            .api
            .create_raw(
                GraphCollection::ConditionalAccessPolicies,
                encode_policy(&policy)?,
                session,
            )
            .await;

        match first_attempt {
            Ok(body) => Ok(body),
            Err(error) => {
                // Source-tenant directory references rarely resolve in the
                // destination; degrade the targeting scope instead of
                // remapping identifiers.
                warn!(%error, "conditional access creation failed, retrying sanitized");
                policy.scrub_directory_references();
                let body = self
                    .api
                    .create_raw(
                        GraphCollection::ConditionalAccessPolicies,
                        encode_policy(&policy)?,
                        session,
                    )
                    .await?;
                Ok(format!("{SANITIZED_IMPORT_NOTICE}\r\n{body}"))
            }
        }
    }

    async fn push_target_apps(
        &self,
        collection: GraphCollection,
        id: &str,
        original: &Value,
        session: Option<&str>,
    ) -> Result<()> {
        let request = AppTargetRequest::from_document(original)?;
        let payload = serde_json::to_value(&request).map_err(|e| {
            TenantShiftError::Internal(format!("failed to encode app targeting request: {e}"))
        })?;
        self.api.assign_target_apps(collection, id, &payload, session).await
    }
}

fn encode_policy(policy: &ConditionalAccessPolicy) -> Result<String> {
    serde_json::to_string_pretty(policy)
        .map_err(|e| TenantShiftError::Internal(format!("failed to encode policy: {e}")))
}

/// Run-and-discard for writes that must never fail the surrounding import.
/// The discard is deliberate and visible at the call site.
fn best_effort<T>(operation: &str, result: Result<T>) {
    if let Err(error) = result {
        warn!(operation, %error, "best-effort operation failed; continuing");
    }
}
