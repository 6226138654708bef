//! Event records and the stream-metadata merge
//!
//! A [`ClientStreamEvent`] is an open record: arbitrary top-level fields
//! plus a partial `strmMeta` sub-record. [`ApiStreamEvent::merge`] turns it
//! into the wire record by writing the injected `{schemaId, nonce,
//! timestamp}` triple over the caller's metadata.

use serde_json::{Map, Value};

use crate::error::ProtocolError;
use crate::{NONCE_FIELD, SCHEMA_ID_FIELD, STREAM_META_FIELD, TIMESTAMP_FIELD};

/// Stream metadata injected into every outbound event
///
/// The schema id comes from sender configuration; nonce and timestamp are
/// derived per call (sequence counter and system clock).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamMeta {
    /// Schema id the event was encoded with
    pub schema_id: String,
    /// Per-sender sequence number
    pub nonce: i64,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Caller-supplied event payload
///
/// An open record: any top-level fields the schema expects, plus an
/// optional partial `strmMeta`. The sender borrows it for the duration of
/// one send and never mutates it.
///
/// # Example
///
/// ```
/// use strm_protocol::ClientStreamEvent;
///
/// let event = ClientStreamEvent::from_json(serde_json::json!({
///     "id": "a1",
///     "value": 42.0,
///     "strmMeta": {}
/// })).unwrap();
///
/// assert_eq!(event.fields()["id"], "a1");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientStreamEvent {
    fields: Map<String, Value>,
    stream_meta: Map<String, Value>,
}

impl ClientStreamEvent {
    /// Create an empty event
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an event from a JSON object
    ///
    /// A `strmMeta` key, if present, is split out as the partial stream
    /// metadata; everything else becomes a top-level field.
    ///
    /// # Errors
    ///
    /// Returns error if `value` is not an object, or if `strmMeta` is
    /// present but not an object.
    pub fn from_json(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(mut fields) = value else {
            return Err(ProtocolError::NotAnObject);
        };

        let stream_meta = match fields.remove(STREAM_META_FIELD) {
            Some(Value::Object(meta)) => meta,
            Some(_) => return Err(ProtocolError::InvalidStreamMeta),
            None => Map::new(),
        };

        Ok(Self {
            fields,
            stream_meta,
        })
    }

    /// Insert a top-level field
    pub fn insert_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Insert a field into the partial stream metadata
    pub fn insert_meta_field(&mut self, name: impl Into<String>, value: Value) {
        self.stream_meta.insert(name.into(), value);
    }

    /// Top-level event fields
    #[inline]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Partial stream metadata
    #[inline]
    pub fn stream_meta(&self) -> &Map<String, Value> {
        &self.stream_meta
    }
}

/// Fully-populated wire record
///
/// Produced fresh per send by [`ApiStreamEvent::merge`]; has no lifecycle
/// beyond the call that created it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiStreamEvent {
    fields: Map<String, Value>,
    stream_meta: Map<String, Value>,
}

impl ApiStreamEvent {
    /// Merge a client event with injected stream metadata
    ///
    /// Clones the caller's fields and metadata, then writes `schemaId`,
    /// `nonce`, and `timestamp` over any caller-supplied values. Injected
    /// fields always win; other caller metadata fields are preserved.
    #[must_use]
    pub fn merge(event: &ClientStreamEvent, meta: &StreamMeta) -> Self {
        let mut stream_meta = event.stream_meta.clone();
        stream_meta.insert(
            SCHEMA_ID_FIELD.to_string(),
            Value::String(meta.schema_id.clone()),
        );
        stream_meta.insert(NONCE_FIELD.to_string(), Value::from(meta.nonce));
        stream_meta.insert(TIMESTAMP_FIELD.to_string(), Value::from(meta.timestamp));

        Self {
            fields: event.fields.clone(),
            stream_meta,
        }
    }

    /// Render the full record as a JSON object with `strmMeta` nested
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut record = self.fields.clone();
        record.insert(
            STREAM_META_FIELD.to_string(),
            Value::Object(self.stream_meta.clone()),
        );
        Value::Object(record)
    }

    /// Top-level event fields
    #[inline]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Completed stream metadata
    #[inline]
    pub fn stream_meta(&self) -> &Map<String, Value> {
        &self.stream_meta
    }
}
