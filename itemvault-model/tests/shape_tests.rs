use itemvault_model::{CommandOperations, EventPolicy, FieldKind, FieldSpec, ItemShape, ShapeError};
use itemvault_types::Item;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::tracked("/publicMessage"),
        FieldSpec::plain("/privateMessage"),
        FieldSpec::encrypted("/secret"),
        FieldSpec::excluded("/scratch"),
    ]
}

#[test]
fn builds_a_shape() {
    let shape = ItemShape::new(
        "test-item",
        fields(),
        CommandOperations::all(),
        EventPolicy::OnlyTrackedChanges,
    )
    .unwrap();

    assert_eq!(shape.type_name().as_str(), "test-item");
    assert_eq!(shape.fields().len(), 4);
    assert_eq!(shape.event_policy(), EventPolicy::OnlyTrackedChanges);
    assert!(shape.has_encrypted_fields());
}

#[test]
fn rejects_invalid_type_name() {
    let err = ItemShape::new("UpperCase", vec![], CommandOperations::all(), EventPolicy::AllChanges)
        .unwrap_err();
    assert!(matches!(err, ShapeError::TypeName(_)));
}

#[test]
fn rejects_reserved_type_name() {
    let err = ItemShape::new("event", vec![], CommandOperations::all(), EventPolicy::AllChanges)
        .unwrap_err();
    assert!(matches!(err, ShapeError::TypeName(_)));
}

#[test]
fn rejects_non_pointer_field_path() {
    let err = ItemShape::new(
        "note",
        vec![FieldSpec::plain("title")],
        CommandOperations::all(),
        EventPolicy::AllChanges,
    )
    .unwrap_err();
    assert!(matches!(err, ShapeError::InvalidFieldPath(_)));
}

#[test]
fn rejects_nested_field_path() {
    // Declared fields address top-level properties only.
    let err = ItemShape::new(
        "note",
        vec![FieldSpec::plain("/meta/inner")],
        CommandOperations::all(),
        EventPolicy::AllChanges,
    )
    .unwrap_err();
    assert!(matches!(err, ShapeError::InvalidFieldPath(_)));
}

#[test]
fn rejects_duplicate_field_path() {
    let err = ItemShape::new(
        "note",
        vec![FieldSpec::plain("/title"), FieldSpec::tracked("/title")],
        CommandOperations::all(),
        EventPolicy::AllChanges,
    )
    .unwrap_err();
    assert!(matches!(err, ShapeError::DuplicateFieldPath(p) if p == "/title"));
}

#[test]
fn fields_of_kind_preserves_declaration_order() {
    let shape = ItemShape::new(
        "note",
        vec![
            FieldSpec::tracked("/b"),
            FieldSpec::plain("/x"),
            FieldSpec::tracked("/a"),
        ],
        CommandOperations::all(),
        EventPolicy::OnlyTrackedChanges,
    )
    .unwrap();

    let tracked: Vec<&str> = shape
        .fields_of_kind(FieldKind::Tracked)
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(tracked, vec!["/b", "/a"]);
}

#[test]
fn validator_closure_runs() {
    let shape = ItemShape::new("note", vec![], CommandOperations::all(), EventPolicy::Disabled)
        .unwrap()
        .with_validator(Arc::new(|item: &Item| {
            if item.get_str("/title").is_some() {
                Ok(())
            } else {
                Err("title is required".to_string())
            }
        }));

    let item = Item::new("id1", "pk1", "note");
    let result = shape.validator().unwrap().validate(&item);
    assert_eq!(result, Err("title is required".to_string()));
}

// ── CommandOperations ────────────────────────────────────────────

#[test]
fn operations_mask_algebra() {
    let ops = CommandOperations::CREATE | CommandOperations::READ;
    assert!(ops.allows(CommandOperations::CREATE));
    assert!(ops.allows(CommandOperations::READ));
    assert!(!ops.allows(CommandOperations::UPDATE));
    assert!(!ops.allows(CommandOperations::DELETE));

    assert!(CommandOperations::all().allows(CommandOperations::DELETE));
    assert!(!CommandOperations::none().allows(CommandOperations::READ));
    assert!(CommandOperations::read_only().allows(CommandOperations::READ));
    assert!(!CommandOperations::read_only().allows(CommandOperations::CREATE));
}
