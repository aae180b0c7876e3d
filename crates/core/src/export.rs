//! Export-side reads over the signed-in tenant's configuration.
//!
//! These produce the JSON documents the import dispatcher later consumes in
//! the destination tenant.

use std::sync::Arc;

use serde_json::Value;
use tenantshift_domain::{GraphCollection, Result, TenantShiftError};

use crate::ports::ManagementApi;

/// Reads configuration collections from the management API for export.
pub struct ExportService {
    api: Arc<dyn ManagementApi>,
}

impl ExportService {
    /// Create a new export service over the management API.
    pub fn new(api: Arc<dyn ManagementApi>) -> Self {
        Self { api }
    }

    /// Device compliance policies.
    pub async fn device_compliance_policies(&self, session: Option<&str>) -> Result<Vec<Value>> {
        self.api.list(GraphCollection::DeviceCompliancePolicies, session).await
    }

    /// Device configuration profiles.
    pub async fn device_configurations(&self, session: Option<&str>) -> Result<Vec<Value>> {
        self.api.list(GraphCollection::DeviceConfigurations, session).await
    }

    /// Device management scripts (listing without script content).
    pub async fn device_management_scripts(&self, session: Option<&str>) -> Result<Vec<Value>> {
        self.api.list(GraphCollection::DeviceManagementScripts, session).await
    }

    /// One device management script as raw text, including the encoded
    /// script content the listing omits.
    pub async fn device_management_script_raw(
        &self,
        id: &str,
        session: Option<&str>,
    ) -> Result<String> {
        self.api.fetch_raw(GraphCollection::DeviceManagementScripts, Some(id), session).await
    }

    /// Enrollment status page, restriction, and Windows Hello configurations.
    pub async fn device_enrollment_configurations(
        &self,
        session: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.api.list(GraphCollection::DeviceEnrollmentConfigurations, session).await
    }

    /// Windows Autopilot deployment profiles.
    pub async fn autopilot_deployment_profiles(&self, session: Option<&str>) -> Result<Vec<Value>> {
        self.api.list(GraphCollection::WindowsAutopilotDeploymentProfiles, session).await
    }

    /// Managed app protection/configuration policies.
    pub async fn managed_app_policies(&self, session: Option<&str>) -> Result<Vec<Value>> {
        self.api.list(GraphCollection::ManagedAppPolicies, session).await
    }

    /// Apps targeted by a targeted managed app configuration.
    pub async fn targeted_app_configuration_apps(
        &self,
        id: &str,
        session: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.api
            .fetch_assigned_apps(GraphCollection::TargetedManagedAppConfigurations, id, session)
            .await
    }

    /// All conditional-access policies as raw response text.
    pub async fn conditional_access_policies_raw(&self, session: Option<&str>) -> Result<String> {
        self.api.fetch_raw(GraphCollection::ConditionalAccessPolicies, None, session).await
    }

    /// One conditional-access policy as raw response text.
    pub async fn conditional_access_policy_raw(
        &self,
        id: &str,
        session: Option<&str>,
    ) -> Result<String> {
        self.api.fetch_raw(GraphCollection::ConditionalAccessPolicies, Some(id), session).await
    }

    /// The default verified domain of the signed-in organization, used to
    /// label export archives.
    pub async fn default_domain(&self, session: Option<&str>) -> Result<String> {
        let organizations = self.api.list(GraphCollection::Organization, session).await?;
        let organization = organizations.first().ok_or_else(|| {
            TenantShiftError::NotFound("no organization returned for the signed-in tenant".into())
        })?;

        let domains = organization
            .get("verifiedDomains")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                TenantShiftError::Parse("organization carries no verifiedDomains".into())
            })?;

        let mut name = domains.first().and_then(|d| d.get("name")).and_then(Value::as_str);
        for domain in domains {
            if domain.get("isDefault").and_then(Value::as_bool).unwrap_or(false) {
                name = domain.get("name").and_then(Value::as_str);
            }
        }

        name.map(str::to_owned)
            .ok_or_else(|| TenantShiftError::Parse("verified domain carries no name".into()))
    }
}
