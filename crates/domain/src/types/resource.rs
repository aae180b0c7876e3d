//! Resource classification and destination-collection routing types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEVICE_MANAGEMENT_SCRIPT_TYPE;

/// The configuration-object kinds the import dispatcher understands.
///
/// Derived from the document's `@odata.type`/`@odata.context` discriminator;
/// `Unknown` marks documents the dispatcher deliberately ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    CompliancePolicy,
    DeviceConfiguration,
    ManagementScript,
    AutopilotDeploymentProfile,
    IosAppProtection,
    AndroidAppProtection,
    TargetedAppConfiguration,
    ConditionalAccessPolicy,
    Unknown,
}

impl ResourceKind {
    /// Destination collection this kind is created in. `None` for `Unknown`.
    pub fn collection(&self) -> Option<GraphCollection> {
        match self {
            Self::CompliancePolicy => Some(GraphCollection::DeviceCompliancePolicies),
            Self::DeviceConfiguration => Some(GraphCollection::DeviceConfigurations),
            Self::ManagementScript => Some(GraphCollection::DeviceManagementScripts),
            Self::AutopilotDeploymentProfile => {
                Some(GraphCollection::WindowsAutopilotDeploymentProfiles)
            }
            Self::IosAppProtection => Some(GraphCollection::IosManagedAppProtections),
            Self::AndroidAppProtection => Some(GraphCollection::AndroidManagedAppProtections),
            Self::TargetedAppConfiguration => {
                Some(GraphCollection::TargetedManagedAppConfigurations)
            }
            Self::ConditionalAccessPolicy => Some(GraphCollection::ConditionalAccessPolicies),
            Self::Unknown => None,
        }
    }

    /// Whether source documents of this kind may carry an `assignedApps`
    /// sub-list that requires the dependent targeting write.
    pub fn carries_assigned_apps(&self) -> bool {
        matches!(
            self,
            Self::IosAppProtection | Self::AndroidAppProtection | Self::TargetedAppConfiguration
        )
    }

    /// Fixed discriminator reported in the import outcome for kinds whose
    /// creation response cannot be trusted to echo one.
    pub fn fixed_type_label(&self) -> Option<&'static str> {
        match self {
            Self::ManagementScript => Some(DEVICE_MANAGEMENT_SCRIPT_TYPE),
            Self::IosAppProtection => Some("#microsoft.graph.iosManagedAppProtection"),
            Self::AndroidAppProtection => Some("#microsoft.graph.androidManagedAppProtection"),
            Self::TargetedAppConfiguration => {
                Some("#microsoft.graph.targetedManagedAppConfiguration")
            }
            _ => None,
        }
    }
}

/// Destination API collections, closed over everything the system writes to
/// or reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphCollection {
    DeviceCompliancePolicies,
    DeviceConfigurations,
    DeviceManagementScripts,
    DeviceEnrollmentConfigurations,
    WindowsAutopilotDeploymentProfiles,
    IosManagedAppProtections,
    AndroidManagedAppProtections,
    TargetedManagedAppConfigurations,
    ManagedAppPolicies,
    ConditionalAccessPolicies,
    Organization,
}

impl GraphCollection {
    /// Relative endpoint path under the destination API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::DeviceCompliancePolicies => "deviceManagement/deviceCompliancePolicies",
            Self::DeviceConfigurations => "deviceManagement/deviceConfigurations",
            Self::DeviceManagementScripts => "deviceManagement/deviceManagementScripts",
            Self::DeviceEnrollmentConfigurations => {
                "deviceManagement/deviceEnrollmentConfigurations"
            }
            Self::WindowsAutopilotDeploymentProfiles => {
                "deviceManagement/windowsAutopilotDeploymentProfiles"
            }
            Self::IosManagedAppProtections => "deviceAppManagement/iosManagedAppProtections",
            Self::AndroidManagedAppProtections => {
                "deviceAppManagement/androidManagedAppProtections"
            }
            Self::TargetedManagedAppConfigurations => {
                "deviceAppManagement/targetedManagedAppConfigurations"
            }
            Self::ManagedAppPolicies => "deviceAppManagement/managedAppPolicies",
            Self::ConditionalAccessPolicies => "conditionalAccess/policies",
            Self::Organization => "organization",
        }
    }
}

/// The destination's creation response, reduced to the fields the dispatcher
/// needs: the destination-issued identifier and the display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedObject {
    #[serde(rename = "@odata.type", default, skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
}

/// Success descriptor returned for an imported configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub resource_type: String,
    pub display_name: String,
}

impl ImportOutcome {
    pub fn new(resource_type: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { resource_type: resource_type.into(), display_name: display_name.into() }
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.resource_type, self.display_name)
    }
}
