//! Event sender - merge, encode, transmit
//!
//! One public operation: [`Sender::send`] merges the caller's event with
//! stream metadata, encodes it against the configured Avro schema, and
//! POSTs it to the gateway. Control flow is linear; the sender holds no
//! state across calls beyond the immutable configuration and the nonce
//! counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::debug;
use url::Url;

use strm_protocol::{
    ApiStreamEvent, ClientStreamEvent, EventSchema, StreamMeta, AVRO_BINARY, OCTET_STREAM,
    SCHEMA_ID_HEADER, SERIALIZATION_TYPE_HEADER,
};

use crate::auth::{CredentialsProvider, StaticTokenProvider, TokenProvider};
use crate::config::{parse_url, SenderConfig};
use crate::error::ConfigError;
use crate::transport::{HttpTransport, Transport, TransportResponse};
use crate::Result;

/// Sends schema-tagged events to the STRM gateway
///
/// Safe to share across tasks: concurrent sends read the immutable
/// configuration and bump the atomic nonce counter, nothing else.
///
/// # Example
///
/// ```no_run
/// use strm_client::{EventBuilder, Sender, SenderConfig};
///
/// # async fn run(config: SenderConfig) -> Result<(), strm_client::SenderError> {
/// let sender = Sender::new(config)?;
///
/// let event = EventBuilder::new().field("id", "a1").build();
/// let response = sender.send(&event).await?;
/// # Ok(())
/// # }
/// ```
pub struct Sender {
    gateway_url: Url,
    schema_id: String,
    schema: EventSchema,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
    nonce: AtomicU64,
}

impl std::fmt::Debug for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sender")
            .field("gateway_url", &self.gateway_url.as_str())
            .field("schema_id", &self.schema_id)
            .field("schema", &self.schema.name())
            .finish()
    }
}

impl Sender {
    /// Create a sender with the reqwest-backed transport
    ///
    /// Builds one `reqwest::Client` shared by the transport and the token
    /// provider, and registers the gateway URL as an authenticated API
    /// URL so the bearer header is attached to every send.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the gateway URL or schema id is
    /// invalid, the schema does not parse, or no usable auth is
    /// configured.
    pub fn new(config: SenderConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("strm-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http.timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "http",
                message: e.to_string(),
            })?;

        let provider: Arc<dyn TokenProvider> = match (&config.auth.token, config.auth.credentials())
        {
            (Some(token), _) => Arc::new(StaticTokenProvider::new(token.clone())),
            (None, Some(credentials)) => Arc::new(CredentialsProvider::new(
                config.auth.url.clone(),
                credentials,
                client.clone(),
            )),
            (None, None) => return Err(ConfigError::MissingCredentials.into()),
        };

        let transport = Arc::new(HttpTransport::new(
            client,
            provider,
            vec![config.gateway.url.clone()],
        ));

        Self::with_transport(config, transport)
    }

    /// Create a sender over a caller-supplied transport
    ///
    /// Used by tests and by callers that bring their own HTTP stack. The
    /// transport owns credential injection; the sender only supplies the
    /// content and vendor headers.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the gateway URL or schema id is
    /// invalid or the schema does not parse.
    pub fn with_transport(config: SenderConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let gateway_url = parse_url("gateway.url", &config.gateway.url)?;

        if config.gateway.schema_id.is_empty() {
            return Err(ConfigError::MissingField("gateway.schema_id").into());
        }

        let definition = config.gateway.schema_definition()?;
        let schema = EventSchema::parse(&definition).map_err(ConfigError::Schema)?;

        let headers = build_headers(&config.gateway.schema_id)?;

        Ok(Self {
            gateway_url,
            schema_id: config.gateway.schema_id,
            schema,
            headers,
            transport,
            nonce: AtomicU64::new(0),
        })
    }

    /// Schema id attached to every outbound event
    #[inline]
    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    /// Gateway endpoint events are posted to
    #[inline]
    pub fn gateway_url(&self) -> &Url {
        &self.gateway_url
    }

    /// Send one event
    ///
    /// Merges the event with injected stream metadata (configured schema
    /// id, next nonce, current timestamp), encodes it, and POSTs it to the
    /// gateway. At most one outbound request per call; an encoding failure
    /// sends nothing. The response is returned verbatim - a non-2xx status
    /// is NOT converted into an error.
    ///
    /// # Errors
    ///
    /// Returns error if the merged event does not conform to the schema,
    /// or if the transport fails (network error, timeout, token
    /// acquisition). Never retries.
    pub async fn send(&self, event: &ClientStreamEvent) -> Result<TransportResponse> {
        let meta = self.next_meta();
        let nonce = meta.nonce;

        let merged = ApiStreamEvent::merge(event, &meta);
        let encoded = self.schema.encode(&merged)?;

        debug!(
            url = %self.gateway_url,
            schema_id = %self.schema_id,
            nonce,
            bytes = encoded.len(),
            "sending event"
        );

        let response = self
            .transport
            .post(&self.gateway_url, encoded.into_bytes(), self.headers.clone())
            .await?;

        debug!(status = response.status, "gateway responded");

        Ok(response)
    }

    /// Stream metadata for the next send: configured schema id, next
    /// sequence number, current wall-clock time in milliseconds
    fn next_meta(&self) -> StreamMeta {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed) as i64;
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        StreamMeta {
            schema_id: self.schema_id.clone(),
            nonce,
            timestamp,
        }
    }
}

/// Build the fixed header set attached to every send
fn build_headers(schema_id: &str) -> std::result::Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM));

    headers.insert(
        header_name(SERIALIZATION_TYPE_HEADER)?,
        HeaderValue::from_static(AVRO_BINARY),
    );

    let schema_id_value =
        HeaderValue::from_str(schema_id).map_err(|_| ConfigError::InvalidValue {
            field: "gateway.schema_id",
            message: "not a valid header value".to_string(),
        })?;
    headers.insert(header_name(SCHEMA_ID_HEADER)?, schema_id_value);

    Ok(headers)
}

fn header_name(name: &'static str) -> std::result::Result<HeaderName, ConfigError> {
    HeaderName::try_from(name).map_err(|_| ConfigError::InvalidValue {
        field: "header",
        message: format!("'{}' is not a valid header name", name),
    })
}
