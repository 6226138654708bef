//! Avro schema wrapper and binary encoding
//!
//! Wraps a parsed `apache_avro::Schema` and encodes merged event records
//! as single Avro datums. Encoding is schema-driven and deterministic:
//! the same record encodes to byte-identical output.

use apache_avro::types::Value as AvroValue;
use apache_avro::{from_avro_datum, to_avro_datum, to_value, Schema};
use bytes::Bytes;

use crate::error::ProtocolError;
use crate::event::ApiStreamEvent;
use crate::Result;

/// A parsed Avro schema bound to a stream of events
///
/// # Example
///
/// ```
/// use strm_protocol::EventSchema;
///
/// let schema = EventSchema::parse(r#"{
///     "type": "record",
///     "name": "Example",
///     "fields": [
///         {"name": "id", "type": "string"}
///     ]
/// }"#).unwrap();
///
/// assert_eq!(schema.name(), "Example");
/// ```
#[derive(Debug, Clone)]
pub struct EventSchema {
    schema: Schema,
    name: String,
}

impl EventSchema {
    /// Parse a schema from its JSON definition
    ///
    /// # Errors
    ///
    /// Returns error if the definition is not valid Avro JSON or the root
    /// is not a record (event schemas must be records).
    pub fn parse(definition: &str) -> Result<Self> {
        let schema = Schema::parse_str(definition).map_err(ProtocolError::SchemaParse)?;

        let name = match &schema {
            Schema::Record(record) => record.name.fullname(None),
            other => return Err(ProtocolError::NotARecord(schema_kind(other).to_string())),
        };

        Ok(Self { schema, name })
    }

    /// Full name of the record schema
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encode a merged event as a single Avro datum
    ///
    /// Resolution against the schema happens before any bytes are
    /// produced, so a non-conforming record fails cleanly with nothing
    /// partially written.
    ///
    /// # Errors
    ///
    /// Returns error if the record does not conform to the schema
    /// (missing field without a default, wrong type, etc.).
    pub fn encode(&self, event: &ApiStreamEvent) -> Result<EncodedEvent> {
        let value =
            to_value(event.to_json()).map_err(|e| ProtocolError::encode(&self.name, &e))?;

        let resolved = value
            .resolve(&self.schema)
            .map_err(|e| ProtocolError::encode(&self.name, &e))?;

        let bytes =
            to_avro_datum(&self.schema, resolved).map_err(|e| ProtocolError::encode(&self.name, &e))?;

        Ok(EncodedEvent {
            bytes: Bytes::from(bytes),
        })
    }

    /// Decode a single Avro datum back into an Avro value
    ///
    /// Used by tests and debugging tools to inspect wire bodies.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are not a valid datum for this schema.
    pub fn decode(&self, mut bytes: &[u8]) -> Result<AvroValue> {
        from_avro_datum(&self.schema, &mut bytes, None).map_err(ProtocolError::Decode)
    }
}

/// Short name for a non-record schema root, used in error messages
fn schema_kind(schema: &Schema) -> &'static str {
    match schema {
        Schema::Null => "null",
        Schema::Boolean => "boolean",
        Schema::Int => "int",
        Schema::Long => "long",
        Schema::Float => "float",
        Schema::Double => "double",
        Schema::Bytes => "bytes",
        Schema::String => "string",
        Schema::Array(_) => "array",
        Schema::Map(_) => "map",
        Schema::Union(_) => "union",
        Schema::Enum(_) => "enum",
        Schema::Fixed(_) => "fixed",
        _ => "non-record",
    }
}

/// An encoded Avro datum ready to send
#[derive(Debug, Clone)]
pub struct EncodedEvent {
    bytes: Bytes,
}

impl EncodedEvent {
    /// Get the raw bytes of the datum
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to owned Bytes
    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Length of the datum in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the datum is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
