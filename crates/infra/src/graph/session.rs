//! OAuth session provider for the destination API.
//!
//! The host application completes the interactive sign-in and seeds this
//! provider with the resulting token material; from then on the provider
//! hands out the cached access token and silently refreshes it through the
//! OAuth2 refresh-token grant shortly before it expires.

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tenantshift_core::ports::AccessTokenProvider;
use tenantshift_domain::{GraphAuthConfig, Result, TenantShiftError};
use tokio::sync::RwLock;
use tracing::debug;

/// Refresh this long before the access token expires.
const REFRESH_THRESHOLD_SECS: i64 = 300;

/// Token material for one signed-in user session.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionTokens {
    /// Returns true when the access token is expired or will expire within
    /// the grace period.
    fn needs_refresh(&self, grace: Duration) -> bool {
        Utc::now() + grace >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    // The identity platform may rotate the refresh token; fall back to the
    // old one when it does not.
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Caches a session's tokens and refreshes them on demand.
pub struct GraphSessionProvider {
    auth: GraphAuthConfig,
    http: reqwest::Client,
    tokens: RwLock<Option<SessionTokens>>,
    refresh_threshold: Duration,
}

impl GraphSessionProvider {
    /// Create an unseeded provider; `access_token` fails until [`Self::seed`]
    /// is called with tokens from an interactive sign-in.
    pub fn new(auth: GraphAuthConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(30))
            .no_proxy()
            .build()
            .map_err(|e| TenantShiftError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            auth,
            http,
            tokens: RwLock::new(None),
            refresh_threshold: Duration::seconds(REFRESH_THRESHOLD_SECS),
        })
    }

    /// Provider seeded with the tokens captured at sign-in.
    pub fn with_tokens(auth: GraphAuthConfig, tokens: SessionTokens) -> Result<Self> {
        let mut provider = Self::new(auth)?;
        provider.tokens = RwLock::new(Some(tokens));
        Ok(provider)
    }

    /// Replace the cached tokens (e.g. after a fresh interactive sign-in).
    pub async fn seed(&self, tokens: SessionTokens) {
        *self.tokens.write().await = Some(tokens);
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens> {
        let scope = self.auth.scope_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", &self.auth.client_id),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("scope", &scope),
        ];
        if let Some(secret) = self.auth.client_secret.as_deref() {
            params.push(("client_secret", secret));
        }

        let response = self
            .http
            .post(&self.auth.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| TenantShiftError::Auth(format!("token refresh request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TenantShiftError::Auth(format!(
                "token refresh failed ({status}): {body}"
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| TenantShiftError::Auth(format!("failed to parse token response: {e}")))?;

        Ok(SessionTokens {
            access_token: token_response.access_token,
            refresh_token: token_response
                .refresh_token
                .unwrap_or_else(|| refresh_token.to_string()),
            expires_at: Utc::now() + Duration::seconds(token_response.expires_in),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for GraphSessionProvider {
    async fn access_token(&self) -> Result<String> {
        {
            let tokens = self.tokens.read().await;
            if let Some(tokens) = tokens.as_ref() {
                if !tokens.needs_refresh(self.refresh_threshold) {
                    return Ok(tokens.access_token.clone());
                }
            }
        }

        let refresh_token = {
            let tokens = self.tokens.read().await;
            tokens
                .as_ref()
                .map(|t| t.refresh_token.clone())
                .ok_or_else(|| TenantShiftError::Auth("no session tokens; sign in first".into()))?
        };

        debug!("refreshing destination API access token");
        let refreshed = self.refresh(&refresh_token).await?;
        let access_token = refreshed.access_token.clone();
        *self.tokens.write().await = Some(refreshed);

        Ok(access_token)
    }
}
