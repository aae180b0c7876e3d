//! Configuration structures injected into the infrastructure layer.
//!
//! The host application owns acquisition of these values (app registration,
//! sign-in, settings storage); this crate only defines the immutable shapes.
//! Nothing here reads process-wide state.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRAPH_ENDPOINT, DEFAULT_TOKEN_ENDPOINT};

/// Destination management API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphApiConfig {
    /// Base URL every collection path is resolved against, without a
    /// trailing slash.
    pub base_url: String,
}

impl Default for GraphApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_GRAPH_ENDPOINT.to_string() }
    }
}

/// OAuth client configuration for the session provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphAuthConfig {
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    pub token_endpoint: String,
    pub scopes: Vec<String>,
}

impl GraphAuthConfig {
    /// Configuration for the Microsoft identity platform with the scopes the
    /// import and export surfaces require.
    pub fn microsoft(client_id: impl Into<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            scopes: vec![
                "DeviceManagementConfiguration.ReadWrite.All".to_string(),
                "DeviceManagementApps.ReadWrite.All".to_string(),
                "DeviceManagementServiceConfig.ReadWrite.All".to_string(),
                "Policy.Read.All".to_string(),
                "Policy.ReadWrite.ConditionalAccess".to_string(),
                "offline_access".to_string(),
            ],
        }
    }

    /// Space-separated scope string as sent on the token request.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_api_config_targets_the_beta_endpoint() {
        let config = GraphApiConfig::default();
        assert_eq!(config.base_url, "https://graph.microsoft.com/beta");
    }

    #[test]
    fn microsoft_auth_config_carries_required_scopes() {
        let config = GraphAuthConfig::microsoft("client-id", Some("secret".into()));

        assert_eq!(config.client_id, "client-id");
        assert_eq!(
            config.token_endpoint,
            "https://login.microsoftonline.com/common/oauth2/v2.0/token"
        );
        assert!(config.scopes.iter().any(|s| s == "Policy.ReadWrite.ConditionalAccess"));
        assert!(config.scopes.iter().any(|s| s == "offline_access"));
        assert!(config.scope_string().contains("DeviceManagementApps.ReadWrite.All "));
    }
}
