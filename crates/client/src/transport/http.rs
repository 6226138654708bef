//! reqwest-backed transport with bearer injection
//!
//! Attaches `Authorization: Bearer <token>` for URLs under the configured
//! API prefixes and performs the POST. Network failures are classified
//! into [`TransportError`] variants; response statuses are passed through
//! untouched.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::trace;
use url::Url;

use super::{Transport, TransportResponse};
use crate::auth::TokenProvider;
use crate::error::{AuthError, TransportError};

/// Production transport wrapping a `reqwest::Client`
pub struct HttpTransport {
    client: reqwest::Client,
    token_provider: Arc<dyn TokenProvider>,
    api_urls: Vec<String>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("provider", &self.token_provider.name())
            .field("api_urls", &self.api_urls)
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport
    ///
    /// `api_urls` are URL prefixes that receive the bearer header; any
    /// other URL is posted without credentials.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        token_provider: Arc<dyn TokenProvider>,
        api_urls: Vec<String>,
    ) -> Self {
        Self {
            client,
            token_provider,
            api_urls,
        }
    }

    /// Whether a URL is under one of the authenticated API prefixes
    fn requires_auth(&self, url: &Url) -> bool {
        let url = url.as_str();
        self.api_urls.iter().any(|prefix| url.starts_with(prefix.as_str()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        body: Bytes,
        mut headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        if self.requires_auth(url) {
            let token = self.token_provider.bearer_token().await?;
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| AuthError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        }

        trace!(url = %url, bytes = body.len(), "posting");

        let response = self
            .client
            .post(url.clone())
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
