use serde_json::Value;
use std::collections::{HashMap, VecDeque};

/// Flattens a value tree into a JSON-pointer-addressed map.
///
/// Breadth-first walk: the root is pointer `/`, object keys append `/key`,
/// array indices append `/index`. Every node (not just leaves) gets an
/// entry, so lookups during diffing are O(1) at any depth.
pub fn flatten(tree: &Value) -> HashMap<String, &Value> {
    let mut map = HashMap::new();
    let mut queue: VecDeque<(String, &Value)> = VecDeque::new();
    queue.push_back(("/".to_string(), tree));

    while let Some((pointer, node)) = queue.pop_front() {
        match node {
            Value::Object(fields) => {
                for (key, child) in fields {
                    queue.push_back((join(&pointer, key), child));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    queue.push_back((join(&pointer, &index.to_string()), child));
                }
            }
            _ => {}
        }
        map.insert(pointer, node);
    }
    map
}

fn join(parent: &str, segment: &str) -> String {
    if parent == "/" {
        format!("/{segment}")
    } else {
        format!("{parent}/{segment}")
    }
}
