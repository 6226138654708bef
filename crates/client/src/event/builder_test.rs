//! Tests for EventBuilder

use serde_json::json;

use crate::event::EventBuilder;

#[test]
fn test_build_empty_event() {
    let event = EventBuilder::new().build();

    assert!(event.fields().is_empty());
    assert!(event.stream_meta().is_empty());
}

#[test]
fn test_build_event_with_fields() {
    let event = EventBuilder::new()
        .field("id", "a1")
        .field("value", 42.0)
        .field("active", true)
        .build();

    assert_eq!(event.fields()["id"], "a1");
    assert_eq!(event.fields()["value"], 42.0);
    assert_eq!(event.fields()["active"], true);
}

#[test]
fn test_build_event_with_meta_fields() {
    let event = EventBuilder::new()
        .field("id", "a1")
        .meta_field("consentLevels", vec![0, 1])
        .meta_field("keyLink", "k-1")
        .build();

    assert_eq!(event.stream_meta()["consentLevels"], json!([0, 1]));
    assert_eq!(event.stream_meta()["keyLink"], "k-1");
}

#[test]
fn test_field_overwrites_previous_value() {
    let event = EventBuilder::new()
        .field("id", "first")
        .field("id", "second")
        .build();

    assert_eq!(event.fields()["id"], "second");
}

#[test]
fn test_builder_matches_from_json() {
    use strm_protocol::ClientStreamEvent;

    let built = EventBuilder::new()
        .field("id", "a1")
        .meta_field("keyLink", "k-1")
        .build();

    let parsed = ClientStreamEvent::from_json(json!({
        "id": "a1",
        "strmMeta": {"keyLink": "k-1"}
    }))
    .unwrap();

    assert_eq!(built, parsed);
}
