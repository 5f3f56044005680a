use itemvault_types::{Item, ItemEvent, PropertyChange, SaveAction};
use serde_json::json;

#[test]
fn event_captures_identity_and_action() {
    let event = ItemEvent::new("id1", "pk1", SaveAction::Created, None);
    assert_eq!(event.related_id, "id1");
    assert_eq!(event.partition_key, "pk1");
    assert_eq!(event.save_action, SaveAction::Created);
    assert!(event.changes.is_none());
    assert!(event.timestamp > 0);
}

#[test]
fn event_ids_are_unique_and_ordered() {
    let a = ItemEvent::new("id", "pk", SaveAction::Created, None);
    let b = ItemEvent::new("id", "pk", SaveAction::Updated, None);
    assert_ne!(a.id, b.id);
    // UUID v7 embeds the timestamp, so later events sort after earlier ones.
    assert!(a.id.as_uuid() <= b.id.as_uuid());
}

#[test]
fn save_action_serializes_screaming() {
    assert_eq!(serde_json::to_string(&SaveAction::Created).unwrap(), "\"CREATED\"");
    assert_eq!(serde_json::to_string(&SaveAction::Updated).unwrap(), "\"UPDATED\"");
    assert_eq!(serde_json::to_string(&SaveAction::Deleted).unwrap(), "\"DELETED\"");
}

#[test]
fn event_shape_roundtrips() {
    let change = PropertyChange {
        address: "/publicMessage".to_string(),
        old_value: None,
        new_value: Some(json!("PublicMessage #1")),
    };
    let event = ItemEvent::new("id1", "pk1", SaveAction::Created, Some(vec![change]));

    let encoded = serde_json::to_string(&event).unwrap();
    let decoded: ItemEvent = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn missing_and_null_are_distinct_in_changes() {
    let missing = PropertyChange {
        address: "/x".to_string(),
        old_value: None,
        new_value: Some(json!(null)),
    };
    assert!(missing.old_value.is_none());
    assert_eq!(missing.new_value, Some(json!(null)));
}

#[test]
fn item_pointer_accessors() {
    let mut item = Item::new("id1", "pk1", "note");
    item.data = json!({
        "title": "hello",
        "done": false,
        "meta": { "count": 3 }
    });
    assert_eq!(item.get_str("/title"), Some("hello"));
    assert_eq!(item.get_bool("/done"), Some(false));
    assert_eq!(item.get_number("/meta/count"), Some(3.0));
    assert_eq!(item.get_str("/missing"), None);
}

#[test]
fn mark_deleted_sets_soft_delete_fields() {
    let mut item = Item::new("id1", "pk1", "note");
    assert!(!item.is_deleted);
    assert!(item.deleted_at.is_none());
    item.mark_deleted();
    assert!(item.is_deleted);
    assert!(item.deleted_at.is_some());
    assert!(item.updated_at >= item.created_at);
}
