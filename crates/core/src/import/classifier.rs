//! Type classification of exported configuration documents.
//!
//! A document declares its kind through the `@odata.type` (or, for some
//! exports, `@odata.context`) discriminator. Classification is a fixed
//! priority list of case-sensitive substring checks; a document matching
//! none of them is `Unknown`, which the dispatcher treats as "ignore", not
//! as an error.

use serde_json::Value;
use tenantshift_domain::{ResourceKind, Result, TenantShiftError};

/// Extract the type discriminator from a parsed configuration document.
pub fn discriminator(document: &Value) -> Result<&str> {
    document
        .get("@odata.type")
        .or_else(|| document.get("@odata.context"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            TenantShiftError::Parse(
                "document carries no @odata.type/@odata.context discriminator".into(),
            )
        })
}

/// Classify a parsed configuration document.
pub fn classify(document: &Value) -> Result<ResourceKind> {
    Ok(classify_discriminator(discriminator(document)?))
}

/// Apply the substring rules to a discriminator value. First match wins.
pub fn classify_discriminator(discriminator: &str) -> ResourceKind {
    if discriminator.contains("CompliancePolicy") {
        ResourceKind::CompliancePolicy
    } else if discriminator.contains("Configuration") && discriminator.contains("windows") {
        ResourceKind::DeviceConfiguration
    } else if discriminator.contains("deviceManagementScripts") {
        ResourceKind::ManagementScript
    } else if discriminator.contains("WindowsAutopilotDeploymentProfile") {
        ResourceKind::AutopilotDeploymentProfile
    } else if discriminator.contains("#microsoft.graph.iosManagedAppProtection") {
        ResourceKind::IosAppProtection
    } else if discriminator.contains("#microsoft.graph.androidManagedAppProtection") {
        ResourceKind::AndroidAppProtection
    } else if discriminator.contains("#microsoft.graph.targetedManagedAppConfiguration") {
        ResourceKind::TargetedAppConfiguration
    } else {
        ResourceKind::Unknown
    }
}
