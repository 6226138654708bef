//! Protocol error types
//!
//! Errors that can occur when parsing schemas or encoding events.

use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Schema definition failed to parse
    #[error("invalid Avro schema: {0}")]
    SchemaParse(#[source] apache_avro::Error),

    /// Schema root is not a record
    #[error("schema root must be an Avro record, got {0}")]
    NotARecord(String),

    /// Event value is not a JSON object
    #[error("event must be a JSON object")]
    NotAnObject,

    /// Stream metadata is present but not an object
    #[error("strmMeta must be a JSON object")]
    InvalidStreamMeta,

    /// Event does not conform to the schema
    #[error("event does not conform to schema '{schema}': {message}")]
    Encode {
        /// Full name of the record schema
        schema: String,
        /// Underlying encoder message
        message: String,
    },

    /// Datum bytes failed to decode
    #[error("failed to decode event: {0}")]
    Decode(#[source] apache_avro::Error),
}

impl ProtocolError {
    /// Create an Encode error from an Avro encoder failure
    #[inline]
    pub(crate) fn encode(schema: &str, err: &apache_avro::Error) -> Self {
        Self::Encode {
            schema: schema.to_string(),
            message: err.to_string(),
        }
    }
}
