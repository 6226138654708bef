//! STRM Protocol - Wire types for the STRM event gateway
//!
//! This crate provides the types that cross the wire on every send:
//! - `ClientStreamEvent` - Caller-supplied event with partial stream metadata
//! - `ApiStreamEvent` - Fully-populated record produced by the metadata merge
//! - `StreamMeta` - The injected `{schemaId, nonce, timestamp}` triple
//! - `EventSchema` - Avro schema wrapper for binary encoding/decoding
//! - `EncodedEvent` - An encoded Avro datum ready to POST
//!
//! # Wire Format
//!
//! Events are encoded as single Avro datums (no container file, no
//! single-object framing) and sent as the raw POST body. The gateway
//! identifies the encoding via two vendor headers:
//!
//! - `Strm-Serialization-Type: application/x-avro-binary`
//! - `Strm-Schema-Id: <schema id>`
//!
//! # Merge Semantics
//!
//! [`ApiStreamEvent::merge`] completes the caller's `strmMeta` sub-record.
//! Injected fields always win: a caller-supplied `schemaId`, `nonce`, or
//! `timestamp` is overwritten, while any other caller metadata fields are
//! carried through untouched. The caller's event is never mutated.

mod error;
mod event;
mod schema;

pub use error::ProtocolError;
pub use event::{ApiStreamEvent, ClientStreamEvent, StreamMeta};
pub use schema::{EncodedEvent, EventSchema};

// Re-exports for convenience: wire bodies are Bytes, decoded datums are
// Avro values
pub use apache_avro::types::Value as AvroValue;
pub use bytes::Bytes;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Vendor header naming the serialization format
pub const SERIALIZATION_TYPE_HEADER: &str = "Strm-Serialization-Type";

/// Vendor header carrying the schema id
pub const SCHEMA_ID_HEADER: &str = "Strm-Schema-Id";

/// Fixed serialization-type value for Avro binary datums
pub const AVRO_BINARY: &str = "application/x-avro-binary";

/// Content type for encoded event bodies
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Wire name of the stream-metadata sub-record
pub const STREAM_META_FIELD: &str = "strmMeta";

/// Wire name of the schema id within `strmMeta`
pub const SCHEMA_ID_FIELD: &str = "schemaId";

/// Wire name of the sequence number within `strmMeta`
pub const NONCE_FIELD: &str = "nonce";

/// Wire name of the timestamp within `strmMeta`
pub const TIMESTAMP_FIELD: &str = "timestamp";

#[cfg(test)]
mod schema_test;
