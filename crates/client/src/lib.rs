//! STRM Client Library
//!
//! This crate is the client driver for the STRM event gateway. It takes a
//! structured event, completes its stream metadata, encodes it as an Avro
//! binary datum, and POSTs it to the configured gateway endpoint with
//! authentication headers.
//!
//! # Architecture
//!
//! - [`Sender`] - merge, encode, transmit a single event
//! - [`EventBuilder`] - construct [`ClientStreamEvent`] records
//! - [`Transport`] - authenticated HTTP capability ([`HttpTransport`] in
//!   production, [`test::MockTransport`] in tests)
//! - [`TokenProvider`] - bearer tokens, either pre-issued
//!   ([`StaticTokenProvider`]) or fetched and refreshed from the auth
//!   service ([`CredentialsProvider`])
//!
//! # Quick Start
//!
//! ```no_run
//! use strm_client::{EventBuilder, Sender, SenderConfig};
//!
//! # async fn run() -> Result<(), strm_client::SenderError> {
//! let config: SenderConfig = r#"
//! [gateway]
//! url = "https://gw.example.com/ingest"
//! schema_id = "evt-v1"
//! schema = '''
//! {
//!     "type": "record",
//!     "name": "Example",
//!     "fields": [
//!         {"name": "id", "type": "string"},
//!         {"name": "strmMeta", "type": {
//!             "type": "record",
//!             "name": "StrmMeta",
//!             "fields": [
//!                 {"name": "schemaId", "type": "string"},
//!                 {"name": "nonce", "type": "long"},
//!                 {"name": "timestamp", "type": "long"}
//!             ]
//!         }}
//!     ]
//! }
//! '''
//!
//! [auth]
//! token = "pre-issued-token"
//! "#
//! .parse()?;
//!
//! let sender = Sender::new(config)?;
//!
//! let event = EventBuilder::new().field("id", "a1").build();
//! let response = sender.send(&event).await?;
//!
//! // Non-2xx responses are returned, not raised - inspect if you care.
//! println!("gateway responded {}", response.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Wire Contract
//!
//! Every send issues exactly one POST with body = Avro datum and headers:
//!
//! - `Content-Type: application/octet-stream`
//! - `Strm-Serialization-Type: application/x-avro-binary`
//! - `Strm-Schema-Id: <configured schema id>`
//! - `Authorization: Bearer <token>` (injected by the transport for URLs
//!   under the configured API prefixes)
//!
//! No retries, no batching, no local buffering across calls.

mod auth;
mod config;
mod error;
mod sender;
mod transport;

pub mod event;
pub mod test;

pub use auth::{Credentials, CredentialsProvider, StaticTokenProvider, TokenProvider};
pub use config::{AuthConfig, GatewayConfig, HttpConfig, SenderConfig};
pub use error::{AuthError, ConfigError, SenderError, TransportError};
pub use event::EventBuilder;
pub use sender::Sender;
pub use transport::{HttpTransport, Transport, TransportResponse};

// Re-export the wire-level types callers interact with
pub use strm_protocol::{
    ApiStreamEvent, AvroValue, ClientStreamEvent, EncodedEvent, EventSchema, ProtocolError,
    StreamMeta,
};

/// Result type for sender operations
pub type Result<T> = std::result::Result<T, SenderError>;
