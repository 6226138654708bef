//! Bearer-token providers
//!
//! The transport asks a [`TokenProvider`] for the current token before
//! each authenticated request. Two providers ship with the crate:
//!
//! - [`StaticTokenProvider`] - a pre-issued token, never refreshed
//! - [`CredentialsProvider`] - authenticates against the auth service and
//!   keeps the token fresh

mod credentials;

pub use credentials::{Credentials, CredentialsProvider};

use async_trait::async_trait;

use crate::error::AuthError;

/// Token provider trait
///
/// Implement this trait to plug in an alternative credential source.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current bearer token, fetching or refreshing as needed
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the token cannot be obtained.
    async fn bearer_token(&self) -> Result<String, AuthError>;

    /// Provider name for logging/debugging
    fn name(&self) -> &'static str;
}

/// Provider for a pre-issued, fixed bearer token
///
/// # Example
///
/// ```
/// use strm_client::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("pre-issued-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Create a provider that always returns the same token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
