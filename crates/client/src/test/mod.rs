//! Test doubles for the transport layer
//!
//! [`MockTransport`] sits at the same seam as the production transport:
//! it records every POST and returns a canned response, so tests can
//! assert on exactly what would have crossed the wire without a network.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use strm_client::test::MockTransport;
//! use strm_client::Sender;
//!
//! let transport = Arc::new(MockTransport::new(204));
//! let sender = Sender::with_transport(config, transport.clone())?;
//!
//! sender.send(&event).await?;
//! assert_eq!(transport.requests().len(), 1);
//! ```

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

use crate::error::TransportError;
use crate::transport::{Transport, TransportResponse};

/// One recorded POST invocation
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Target URL
    pub url: Url,
    /// Request body
    pub body: Bytes,
    /// Request headers as handed to the transport
    pub headers: HeaderMap,
}

/// Transport double that records invocations and returns a canned response
pub struct MockTransport {
    response: TransportResponse,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a mock that answers every POST with the given status
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self::with_response(TransportResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        })
    }

    /// Create a mock that answers every POST with the given response
    #[must_use]
    pub fn with_response(response: TransportResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All requests recorded so far
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(
        &self,
        url: &Url,
        body: Bytes,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(RecordedRequest {
                url: url.clone(),
                body,
                headers,
            });

        Ok(self.response.clone())
    }
}
