//! Builder for client stream events

use serde_json::Value;

use strm_protocol::ClientStreamEvent;

/// Builder for constructing a [`ClientStreamEvent`]
///
/// Events are open records: set whatever top-level fields the stream's
/// schema expects, plus any caller-side stream-metadata fields. The
/// sender fills in `schemaId`, `nonce`, and `timestamp` at send time.
///
/// # Example
///
/// ```
/// use strm_client::EventBuilder;
///
/// let event = EventBuilder::new()
///     .field("id", "a1")
///     .field("value", 42.0)
///     .meta_field("consentLevels", vec![0, 1])
///     .build();
///
/// assert_eq!(event.fields()["id"], "a1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    event: ClientStreamEvent,
}

impl EventBuilder {
    /// Create a new event builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a top-level event field
    #[inline]
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event.insert_field(name, value.into());
        self
    }

    /// Set a field on the partial stream metadata
    ///
    /// Injected fields (`schemaId`, `nonce`, `timestamp`) set here are
    /// overwritten at send time.
    #[inline]
    #[must_use]
    pub fn meta_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event.insert_meta_field(name, value.into());
        self
    }

    /// Finish building
    #[inline]
    #[must_use]
    pub fn build(self) -> ClientStreamEvent {
        self.event
    }
}
