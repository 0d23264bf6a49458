//! Predicates over the three node shapes.
//!
//! A document tree is made of [`serde_json::Value`] nodes with exactly three
//! shapes: objects (string-keyed, iteration order not meaningful), arrays
//! (index-ordered, holes are `null`), and leaves (string, number, boolean,
//! or `null`). `null` is a legitimate value, distinct from "absent".

use serde_json::Value;

/// True for object and array nodes.
pub fn is_container(node: &Value) -> bool {
    matches!(node, Value::Object(_) | Value::Array(_))
}

/// True for scalar and `null` nodes.
pub fn is_leaf(node: &Value) -> bool {
    !is_container(node)
}

/// Number of elements of a node: member count for objects, element count
/// for arrays, and 1 for any leaf.
pub fn element_count(node: &Value) -> usize {
    match node {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_container_and_leaf_are_disjoint() {
        for node in [json!({}), json!({"a": 1}), json!([]), json!([1, 2])] {
            assert!(is_container(&node));
            assert!(!is_leaf(&node));
        }
        for node in [json!(null), json!(true), json!(1), json!(4.2), json!("s")] {
            assert!(is_leaf(&node));
            assert!(!is_container(&node));
        }
    }

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(&json!({"a": 1, "b": 2})), 2);
        assert_eq!(element_count(&json!([1, 2, 3])), 3);
        assert_eq!(element_count(&json!({})), 0);
        assert_eq!(element_count(&json!([])), 0);
        assert_eq!(element_count(&json!("leaf")), 1);
        assert_eq!(element_count(&json!(null)), 1);
    }
}
