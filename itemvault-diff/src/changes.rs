use crate::flatten::flatten;
use itemvault_model::{EventPolicy, FieldKind, ItemShape};
use itemvault_types::PropertyChange;
use serde_json::Value;
use std::collections::HashMap;

/// Computes the net field-level changes between a baseline snapshot and the
/// current state, filtered by the shape's event policy.
///
/// Eligibility:
/// - `Disabled` / `NoChanges`: nothing is eligible.
/// - `OnlyTrackedChanges`: fields marked tracked.
/// - `AllChanges`: every declared field except excluded ones.
///
/// Fields the shape does not declare have no externally-visible name and
/// are never considered. Comparison is by value equality on the flattened
/// trees; a missing value is distinct from JSON `null`. A field changed and
/// then changed back to its baseline value emits nothing — this is a
/// net-effect diff, not an operation log. Emission follows the field
/// table's declaration order.
pub fn compute_changes(
    shape: &ItemShape,
    baseline: Option<&Value>,
    current: Option<&Value>,
) -> Vec<PropertyChange> {
    match shape.event_policy() {
        EventPolicy::Disabled | EventPolicy::NoChanges => return Vec::new(),
        EventPolicy::OnlyTrackedChanges | EventPolicy::AllChanges => {}
    }
    let tracked_only = shape.event_policy() == EventPolicy::OnlyTrackedChanges;

    let empty = HashMap::new();
    let before = baseline.map(flatten).unwrap_or_else(|| empty.clone());
    let after = current.map(flatten).unwrap_or(empty);

    let mut changes = Vec::new();
    for field in shape.fields() {
        let eligible = match field.kind {
            FieldKind::Tracked => true,
            FieldKind::Plain | FieldKind::Encrypted => !tracked_only,
            FieldKind::Excluded => false,
        };
        if !eligible {
            continue;
        }

        let old_value = before.get(field.path.as_str()).copied();
        let new_value = after.get(field.path.as_str()).copied();
        if old_value != new_value {
            changes.push(PropertyChange {
                address: field.path.clone(),
                old_value: old_value.cloned(),
                new_value: new_value.cloned(),
            });
        }
    }
    changes
}
