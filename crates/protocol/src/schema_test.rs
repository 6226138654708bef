//! Tests for the Avro schema wrapper and binary encoding

use apache_avro::types::Value as AvroValue;
use serde_json::json;

use crate::event::{ApiStreamEvent, ClientStreamEvent, StreamMeta};
use crate::schema::EventSchema;
use crate::ProtocolError;

/// Schema matching the demo event shape used across the sender tests
const DEMO_SCHEMA: &str = r#"{
    "type": "record",
    "name": "DemoEvent",
    "fields": [
        {"name": "id", "type": "string"},
        {"name": "value", "type": "double"},
        {"name": "strmMeta", "type": {
            "type": "record",
            "name": "StrmMeta",
            "fields": [
                {"name": "schemaId", "type": "string"},
                {"name": "nonce", "type": "long"},
                {"name": "timestamp", "type": "long"}
            ]
        }}
    ]
}"#;

fn demo_event() -> ApiStreamEvent {
    let event = ClientStreamEvent::from_json(json!({
        "id": "a1",
        "value": 42.0,
        "strmMeta": {}
    }))
    .unwrap();

    let meta = StreamMeta {
        schema_id: "evt-v1".to_string(),
        nonce: 3,
        timestamp: 1700000000000,
    };

    ApiStreamEvent::merge(&event, &meta)
}

/// Look up a field of a decoded Avro record by name
fn field<'a>(record: &'a AvroValue, name: &str) -> &'a AvroValue {
    let AvroValue::Record(fields) = record else {
        panic!("expected record, got {:?}", record);
    };
    &fields
        .iter()
        .find(|(field_name, _)| field_name == name)
        .unwrap_or_else(|| panic!("missing field '{}'", name))
        .1
}

// =============================================================================
// Schema parsing
// =============================================================================

#[test]
fn test_parse_record_schema() {
    let schema = EventSchema::parse(DEMO_SCHEMA).unwrap();
    assert_eq!(schema.name(), "DemoEvent");
}

#[test]
fn test_parse_namespaced_schema() {
    let schema = EventSchema::parse(
        r#"{
            "type": "record",
            "name": "Clickstream",
            "namespace": "io.strm.demo",
            "fields": [{"name": "url", "type": "string"}]
        }"#,
    )
    .unwrap();

    assert_eq!(schema.name(), "io.strm.demo.Clickstream");
}

#[test]
fn test_parse_rejects_invalid_json() {
    let result = EventSchema::parse("{not valid");
    assert!(matches!(result, Err(ProtocolError::SchemaParse(_))));
}

#[test]
fn test_parse_rejects_non_record_root() {
    let result = EventSchema::parse(r#""string""#);
    assert!(matches!(result, Err(ProtocolError::NotARecord(_))));
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn test_encode_produces_bytes() {
    let schema = EventSchema::parse(DEMO_SCHEMA).unwrap();
    let encoded = schema.encode(&demo_event()).unwrap();

    assert!(!encoded.is_empty());
    assert!(encoded.len() > 0);
}

#[test]
fn test_encode_is_deterministic() {
    let schema = EventSchema::parse(DEMO_SCHEMA).unwrap();
    let event = demo_event();

    let first = schema.encode(&event).unwrap();
    let second = schema.encode(&event).unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_encode_rejects_missing_field() {
    let schema = EventSchema::parse(DEMO_SCHEMA).unwrap();

    // "value" is required by the schema and has no default
    let event = ClientStreamEvent::from_json(json!({"id": "a1", "strmMeta": {}})).unwrap();
    let meta = StreamMeta {
        schema_id: "evt-v1".to_string(),
        nonce: 0,
        timestamp: 0,
    };

    let result = schema.encode(&ApiStreamEvent::merge(&event, &meta));
    assert!(matches!(result, Err(ProtocolError::Encode { .. })));
}

#[test]
fn test_encode_rejects_wrong_type() {
    let schema = EventSchema::parse(DEMO_SCHEMA).unwrap();

    let event = ClientStreamEvent::from_json(json!({
        "id": true,
        "value": 42.0,
        "strmMeta": {}
    }))
    .unwrap();
    let meta = StreamMeta {
        schema_id: "evt-v1".to_string(),
        nonce: 0,
        timestamp: 0,
    };

    let result = schema.encode(&ApiStreamEvent::merge(&event, &meta));
    assert!(matches!(result, Err(ProtocolError::Encode { .. })));
}

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn test_encode_decode_round_trip() {
    let schema = EventSchema::parse(DEMO_SCHEMA).unwrap();
    let encoded = schema.encode(&demo_event()).unwrap();

    let decoded = schema.decode(encoded.as_bytes()).unwrap();

    assert_eq!(field(&decoded, "id"), &AvroValue::String("a1".to_string()));
    assert_eq!(field(&decoded, "value"), &AvroValue::Double(42.0));

    let meta = field(&decoded, "strmMeta");
    assert_eq!(
        field(meta, "schemaId"),
        &AvroValue::String("evt-v1".to_string())
    );
    assert_eq!(field(meta, "nonce"), &AvroValue::Long(3));
    assert_eq!(field(meta, "timestamp"), &AvroValue::Long(1700000000000));
}

#[test]
fn test_decode_rejects_truncated_datum() {
    let schema = EventSchema::parse(DEMO_SCHEMA).unwrap();
    let encoded = schema.encode(&demo_event()).unwrap();

    let truncated = &encoded.as_bytes()[..encoded.len() - 1];
    let result = schema.decode(truncated);

    assert!(matches!(result, Err(ProtocolError::Decode(_))));
}
