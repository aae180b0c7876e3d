//! Per-kind normalization of configuration documents for re-creation.
//!
//! Transformers never mutate the source document; each returns a fresh
//! payload ready for the creation endpoint.

use serde_json::{json, Map, Value};
use tenantshift_domain::{ResourceKind, Result, TenantShiftError};

/// Fixed compliance rule injected into every imported compliance policy:
/// require a password and block the device after zero grace hours. A policy
/// floor, not a copy of whatever the source tenant had configured.
fn password_required_actions() -> Value {
    json!([{
        "ruleName": "PasswordRequired",
        "scheduledActionConfigurations": [{
            "actionType": "block",
            "gracePeriodHours": 0,
            "notificationTemplateId": "",
            "notificationMessageCCList": []
        }]
    }])
}

/// Rewrite a classified document into its destination-safe form.
pub fn normalize(kind: ResourceKind, document: &Value) -> Result<Value> {
    let mut payload = as_object(kind, document)?;

    match kind {
        ResourceKind::CompliancePolicy => {
            payload.insert("scheduledActionsForRule".to_string(), password_required_actions());
        }
        ResourceKind::DeviceConfiguration => {
            // the destination rejects creation when this is true
            payload.insert("supportsScopeTags".to_string(), Value::Bool(false));
        }
        ResourceKind::ManagementScript => {
            // the destination rejects a populated identifier on create
            payload.insert("id".to_string(), Value::String(String::new()));
        }
        ResourceKind::AutopilotDeploymentProfile
        | ResourceKind::IosAppProtection
        | ResourceKind::AndroidAppProtection
        | ResourceKind::TargetedAppConfiguration => {}
        ResourceKind::ConditionalAccessPolicy | ResourceKind::Unknown => {
            return Err(TenantShiftError::Normalization(format!(
                "no creation transformer for {kind:?}"
            )));
        }
    }

    Ok(Value::Object(payload))
}

fn as_object(kind: ResourceKind, document: &Value) -> Result<Map<String, Value>> {
    document.as_object().cloned().ok_or_else(|| {
        TenantShiftError::Normalization(format!("{kind:?} document is not a JSON object"))
    })
}
