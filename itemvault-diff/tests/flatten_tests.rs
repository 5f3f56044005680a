use itemvault_diff::flatten;
use serde_json::json;

#[test]
fn root_is_slash() {
    let tree = json!({"a": 1});
    let map = flatten(&tree);
    assert_eq!(map.get("/"), Some(&&tree));
}

#[test]
fn object_keys_append_segments() {
    let tree = json!({"title": "hello", "done": true});
    let map = flatten(&tree);
    assert_eq!(map.get("/title"), Some(&&json!("hello")));
    assert_eq!(map.get("/done"), Some(&&json!(true)));
}

#[test]
fn array_indices_append_segments() {
    let tree = json!({"tags": ["a", "b"]});
    let map = flatten(&tree);
    assert_eq!(map.get("/tags"), Some(&&json!(["a", "b"])));
    assert_eq!(map.get("/tags/0"), Some(&&json!("a")));
    assert_eq!(map.get("/tags/1"), Some(&&json!("b")));
}

#[test]
fn nested_objects_are_addressable() {
    let tree = json!({"meta": {"author": {"name": "kim"}}});
    let map = flatten(&tree);
    assert_eq!(map.get("/meta/author/name"), Some(&&json!("kim")));
}

#[test]
fn mixed_nesting() {
    let tree = json!({"items": [{"qty": 2}, {"qty": 5}]});
    let map = flatten(&tree);
    assert_eq!(map.get("/items/0/qty"), Some(&&json!(2)));
    assert_eq!(map.get("/items/1/qty"), Some(&&json!(5)));
}

#[test]
fn scalar_root() {
    let tree = json!(42);
    let map = flatten(&tree);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("/"), Some(&&json!(42)));
}

#[test]
fn null_values_are_present() {
    let tree = json!({"gone": null});
    let map = flatten(&tree);
    assert_eq!(map.get("/gone"), Some(&&json!(null)));
}

#[test]
fn missing_address_is_absent() {
    let tree = json!({"a": 1});
    let map = flatten(&tree);
    assert!(!map.contains_key("/b"));
}
