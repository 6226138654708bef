//! Transport layer
//!
//! [`Transport`] is the authenticated-HTTP capability the sender posts
//! through: one generic POST returning a raw response descriptor. The
//! production implementation is [`HttpTransport`]; tests use
//! [`MockTransport`](crate::test::MockTransport) at the same seam.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

use crate::error::TransportError;

/// Authenticated HTTP capability consumed by the sender
///
/// Implementations attach the `Authorization` header for URLs they know
/// require it; the sender never handles credentials itself.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a binary body with the given headers, returning the raw
    /// response
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on network failure, timeout, or token
    /// acquisition failure. A non-2xx status is NOT an error.
    async fn post(
        &self,
        url: &Url,
        body: Bytes,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError>;
}

/// Raw HTTP response, passed through to the caller unmodified
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range
    ///
    /// Offered for caller inspection only - the sender itself never
    /// interprets the status.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let mut response = TransportResponse {
            status: 204,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        };
        assert!(response.is_success());

        response.status = 500;
        assert!(!response.is_success());

        response.status = 199;
        assert!(!response.is_success());
    }
}
