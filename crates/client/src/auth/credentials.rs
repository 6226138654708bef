//! Credentials-based token provider
//!
//! Authenticates against the auth service with the billing/client
//! credential triple and keeps the bearer token fresh: the cached token is
//! refreshed when it is within the expiry leeway, and a rejected refresh
//! falls back to full re-authentication.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::TokenProvider;
use crate::error::AuthError;

/// How long before expiry a token is considered stale
const EXPIRY_LEEWAY: Duration = Duration::from_secs(60);

/// The credential triple for the auth service
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Billing account id
    pub billing_id: String,
    /// Client id
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
}

/// Token provider that authenticates with credentials and refreshes
///
/// Safe to share across concurrent sends; the cached token sits behind an
/// async `RwLock` so the common case is a read-lock clone.
pub struct CredentialsProvider {
    auth_url: String,
    credentials: Credentials,
    client: reqwest::Client,
    state: RwLock<Option<TokenState>>,
}

impl std::fmt::Debug for CredentialsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsProvider")
            .field("auth_url", &self.auth_url)
            .field("billing_id", &self.credentials.billing_id)
            .finish()
    }
}

/// Issued token triple, as returned by the auth service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenState {
    id_token: String,
    refresh_token: String,
    /// Seconds since the Unix epoch
    expires_at: u64,
}

impl TokenState {
    /// Whether the token is expired or within the leeway window
    fn is_stale(&self, now: u64) -> bool {
        now + EXPIRY_LEEWAY.as_secs() >= self.expires_at
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthRequest<'a> {
    billing_id: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl CredentialsProvider {
    /// Create a provider for the given auth service and credentials
    ///
    /// The `client` is shared with the transport so both sides use one
    /// connection pool and timeout policy.
    #[must_use]
    pub fn new(
        auth_url: impl Into<String>,
        credentials: Credentials,
        client: reqwest::Client,
    ) -> Self {
        Self {
            auth_url: auth_url.into(),
            credentials,
            client,
            state: RwLock::new(None),
        }
    }

    /// Full authentication with the credential triple
    async fn authenticate(&self) -> Result<TokenState, AuthError> {
        debug!(auth_url = %self.auth_url, "authenticating");

        let request = AuthRequest {
            billing_id: &self.credentials.billing_id,
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
        };

        let response = self
            .client
            .post(format!("{}/auth", self.auth_url))
            .json(&request)
            .send()
            .await?;

        Self::parse_token_response(response).await
    }

    /// Exchange the refresh token for a new token triple
    async fn refresh(&self, refresh_token: &str) -> Result<TokenState, AuthError> {
        debug!(auth_url = %self.auth_url, "refreshing token");

        let response = self
            .client
            .post(format!("{}/refresh", self.auth_url))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        Self::parse_token_response(response).await
    }

    async fn parse_token_response(response: reqwest::Response) -> Result<TokenState, AuthError> {
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<TokenState>()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[async_trait]
impl TokenProvider for CredentialsProvider {
    async fn bearer_token(&self) -> Result<String, AuthError> {
        let now = Self::now_secs();

        // Fast path: cached token still fresh
        if let Some(state) = self.state.read().await.as_ref() {
            if !state.is_stale(now) {
                return Ok(state.id_token.clone());
            }
        }

        // Slow path: re-check under the write lock, then refresh or
        // re-authenticate
        let mut guard = self.state.write().await;

        if let Some(state) = guard.as_ref() {
            if !state.is_stale(now) {
                return Ok(state.id_token.clone());
            }

            match self.refresh(&state.refresh_token).await {
                Ok(fresh) => {
                    let token = fresh.id_token.clone();
                    *guard = Some(fresh);
                    return Ok(token);
                }
                Err(e) => {
                    warn!(error = %e, "token refresh failed, re-authenticating");
                }
            }
        }

        let state = self.authenticate().await?;
        let token = state.id_token.clone();
        *guard = Some(state);
        Ok(token)
    }

    fn name(&self) -> &'static str {
        "credentials"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_state_staleness() {
        let state = TokenState {
            id_token: "t".to_string(),
            refresh_token: "r".to_string(),
            expires_at: 1000,
        };

        assert!(!state.is_stale(900));
        assert!(state.is_stale(940)); // within the 60s leeway
        assert!(state.is_stale(1000));
        assert!(state.is_stale(2000));
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{"idToken": "id", "refreshToken": "ref", "expiresAt": 1700000000}"#;
        let state: TokenState = serde_json::from_str(json).unwrap();

        assert_eq!(state.id_token, "id");
        assert_eq!(state.refresh_token, "ref");
        assert_eq!(state.expires_at, 1700000000);
    }

    #[test]
    fn test_auth_request_wire_format() {
        let request = AuthRequest {
            billing_id: "b",
            client_id: "c",
            client_secret: "s",
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["billingId"], "b");
        assert_eq!(json["clientId"], "c");
        assert_eq!(json["clientSecret"], "s");
    }
}
