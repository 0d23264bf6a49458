//! Writes into a tree: setting values and deleting nodes.
//!
//! Both operations navigate with exclusive access and mutate in place; the
//! caller-visible contract is only that the root reflects the write
//! afterwards. A write never replaces a container with a leaf or vice versa
//! at a path that still has segments beyond it; such writes fail with
//! [`Error::CorruptsDocument`] instead of silently destroying structure.

use serde_json::{Map, Value};

use crate::error::Error;

/// How [`delete_at`] treats the addressed node inside an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeleteMode {
    /// Reset the array slot to `null`, preserving sibling indices.
    Value,
    /// Splice the element out and re-index the remainder.
    Element,
}

// ── Set ──────────────────────────────────────────────────────────────────

/// Install `value` at the segment sequence, synthesizing missing structure.
///
/// An empty segment list replaces the whole root. `path` is the canonical
/// path string for failure messages.
pub(crate) fn set_at(
    root: &mut Option<Value>,
    segments: &[String],
    value: Value,
    path: &str,
) -> Result<(), Error> {
    let Some((head, tail)) = segments.split_first() else {
        *root = Some(value);
        return Ok(());
    };
    match root {
        // An absent or null root is grown over, like any other hole.
        None | Some(Value::Null) => {
            *root = Some(grow(head, tail, value));
            Ok(())
        }
        Some(node) => set_node(node, head, tail, value, path),
    }
}

fn set_node(
    node: &mut Value,
    head: &str,
    tail: &[String],
    value: Value,
    path: &str,
) -> Result<(), Error> {
    match node {
        Value::Object(map) => {
            let holds_container = matches!(
                map.get(head),
                Some(Value::Object(_)) | Some(Value::Array(_))
            );
            let Some((next, rest)) = tail.split_first() else {
                if holds_container {
                    return Err(Error::CorruptsDocument {
                        path: path.to_string(),
                    });
                }
                map.insert(head.to_string(), value);
                return Ok(());
            };
            if holds_scalar(map.get(head)) {
                // Cannot descend through a string, number, or boolean.
                return Err(Error::CorruptsDocument {
                    path: path.to_string(),
                });
            }
            if holds_container {
                if let Some(child) = map.get_mut(head) {
                    return set_node(child, next, rest, value, path);
                }
            }
            // Absent or null member: synthesize the remaining structure.
            map.insert(head.to_string(), grow(next, rest, value));
            Ok(())
        }
        Value::Array(items) => {
            let index = write_index(head, path)?;
            if index >= items.len() {
                // Growth is unconditional and pads with null holes.
                items.resize(index + 1, Value::Null);
            }
            let holds_container = matches!(items[index], Value::Object(_) | Value::Array(_));
            let Some((next, rest)) = tail.split_first() else {
                if holds_container {
                    return Err(Error::CorruptsDocument {
                        path: path.to_string(),
                    });
                }
                items[index] = value;
                return Ok(());
            };
            if holds_scalar(Some(&items[index])) {
                return Err(Error::CorruptsDocument {
                    path: path.to_string(),
                });
            }
            if holds_container {
                set_node(&mut items[index], next, rest, value, path)
            } else {
                items[index] = grow(next, rest, value);
                Ok(())
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(Error::CorruptsDocument {
                path: path.to_string(),
            })
        }
    }
}

/// True for members that are a non-null leaf.
fn holds_scalar(member: Option<&Value>) -> bool {
    matches!(
        member,
        Some(Value::Bool(_)) | Some(Value::Number(_)) | Some(Value::String(_))
    )
}

/// Synthesize fresh structure for `head::tail` with `value` as its leaf.
///
/// A digit-only head becomes an array of `head + 1` slots, all `null` but
/// the addressed one; any other head becomes a single-key object.
fn grow(head: &str, tail: &[String], value: Value) -> Value {
    let built = match tail.split_first() {
        None => value,
        Some((next, rest)) => grow(next, rest, value),
    };
    match dynadoc_path::to_index(head) {
        Some(index) => {
            let mut items = vec![Value::Null; index + 1];
            items[index] = built;
            Value::Array(items)
        }
        None => {
            let mut map = Map::new();
            map.insert(head.to_string(), built);
            Value::Object(map)
        }
    }
}

/// Parse an array-index segment for a write, distinguishing negative from
/// non-numeric segments.
fn write_index(segment: &str, path: &str) -> Result<usize, Error> {
    match segment.parse::<i64>() {
        Ok(index) if index < 0 => Err(Error::NegativeIndex {
            path: path.to_string(),
            index,
        }),
        Ok(index) => Ok(index as usize),
        Err(_) => Err(Error::InvalidIndex {
            path: path.to_string(),
            segment: segment.to_string(),
        }),
    }
}

// ── Delete ───────────────────────────────────────────────────────────────

/// Remove the node at the segment sequence.
///
/// An empty segment list clears the document. Unresolvable paths fail with
/// [`Error::InvalidPath`]; paths extending below a leaf with
/// [`Error::PathTooLong`].
pub(crate) fn delete_at(
    root: &mut Option<Value>,
    segments: &[String],
    mode: DeleteMode,
    path: &str,
) -> Result<(), Error> {
    let Some((head, tail)) = segments.split_first() else {
        *root = None;
        return Ok(());
    };
    match root {
        None => Err(Error::empty_document(path)),
        Some(node) => delete_node(node, head, tail, mode, path),
    }
}

fn delete_node(
    node: &mut Value,
    head: &str,
    tail: &[String],
    mode: DeleteMode,
    path: &str,
) -> Result<(), Error> {
    match node {
        Value::Object(map) => {
            if let Some((next, rest)) = tail.split_first() {
                match map.get_mut(head) {
                    Some(child) => delete_node(child, next, rest, mode, path),
                    None => Err(Error::unknown_key(path, head)),
                }
            } else if map.remove(head).is_some() {
                // Both modes remove the key entirely.
                Ok(())
            } else {
                Err(Error::unknown_key(path, head))
            }
        }
        Value::Array(items) => {
            let Some(index) = dynadoc_path::to_index(head) else {
                return Err(Error::not_an_index(path, head));
            };
            if index >= items.len() {
                return Err(Error::out_of_range(path, index));
            }
            if let Some((next, rest)) = tail.split_first() {
                delete_node(&mut items[index], next, rest, mode, path)
            } else {
                match mode {
                    DeleteMode::Value => items[index] = Value::Null,
                    DeleteMode::Element => {
                        items.remove(index);
                    }
                }
                Ok(())
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(Error::PathTooLong {
                path: path.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segs(path: &str) -> Vec<String> {
        dynadoc_path::split(path, '/')
    }

    fn set(root: &mut Option<Value>, path: &str, value: Value) -> Result<(), Error> {
        let segments = segs(path);
        let canonical = dynadoc_path::join(&segments, '/');
        set_at(root, &segments, value, &canonical)
    }

    #[test]
    fn test_set_replaces_root_on_empty_path() {
        let mut root = Some(json!({"a": 1}));
        set(&mut root, "/", json!("foo")).unwrap();
        assert_eq!(root, Some(json!("foo")));
    }

    #[test]
    fn test_set_synthesizes_objects_and_arrays() {
        let mut root = None;
        set(&mut root, "/a/b/x", json!(1)).unwrap();
        assert_eq!(root, Some(json!({"a": {"b": {"x": 1}}})));

        let mut root = None;
        set(&mut root, "/a/2/x", json!(1)).unwrap();
        assert_eq!(root, Some(json!({"a": [null, null, {"x": 1}]})));
    }

    #[test]
    fn test_set_grows_existing_array_with_null_holes() {
        let mut root = Some(json!({"a": [1]}));
        set(&mut root, "/a/3", json!("x")).unwrap();
        assert_eq!(root, Some(json!({"a": [1, null, null, "x"]})));
    }

    #[test]
    fn test_set_overwrites_leaf() {
        let mut root = Some(json!({"a": {"b": 1}}));
        set(&mut root, "/a/b", json!(2)).unwrap();
        assert_eq!(root, Some(json!({"a": {"b": 2}})));
    }

    #[test]
    fn test_set_through_null_leaf_synthesizes() {
        let mut root = Some(json!({"a": null}));
        set(&mut root, "/a/b", json!(1)).unwrap();
        assert_eq!(root, Some(json!({"a": {"b": 1}})));
    }

    #[test]
    fn test_set_rejects_container_overwrite() {
        let mut root = Some(json!({"a": {"d": [1]}}));
        let err = set(&mut root, "/a/d", json!("stupid")).unwrap_err();
        assert_eq!(err, Error::CorruptsDocument { path: "/a/d".into() });
        // The tree is untouched.
        assert_eq!(root, Some(json!({"a": {"d": [1]}})));
    }

    #[test]
    fn test_set_rejects_descending_through_scalar() {
        let mut root = Some(json!({"a": {"b": true}}));
        let err = set(&mut root, "/a/b/c", json!(1)).unwrap_err();
        assert_eq!(err, Error::CorruptsDocument { path: "/a/b/c".into() });
    }

    #[test]
    fn test_set_index_failures() {
        let mut root = Some(json!({"a": [1, 2]}));
        let err = set(&mut root, "/a/-1", json!("x")).unwrap_err();
        assert_eq!(
            err,
            Error::NegativeIndex { path: "/a/-1".into(), index: -1 }
        );

        let err = set(&mut root, "/a/x", json!("x")).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidIndex { path: "/a/x".into(), segment: "x".into() }
        );
    }

    #[test]
    fn test_set_signed_segment_becomes_object_key_when_growing() {
        let mut root = None;
        set(&mut root, "/a/-1", json!("x")).unwrap();
        assert_eq!(root, Some(json!({"a": {"-1": "x"}})));
    }

    #[test]
    fn test_delete_value_mode_keeps_array_indices() {
        let mut root = Some(json!({"a": [1, 2, 3]}));
        delete_at(&mut root, &segs("/a/1"), DeleteMode::Value, "/a/1").unwrap();
        assert_eq!(root, Some(json!({"a": [1, null, 3]})));
    }

    #[test]
    fn test_delete_element_mode_splices_array() {
        let mut root = Some(json!({"a": [1, 2, 3]}));
        delete_at(&mut root, &segs("/a/1"), DeleteMode::Element, "/a/1").unwrap();
        assert_eq!(root, Some(json!({"a": [1, 3]})));
    }

    #[test]
    fn test_delete_object_key_in_both_modes() {
        for mode in [DeleteMode::Value, DeleteMode::Element] {
            let mut root = Some(json!({"a": {"b": 1, "c": 2}}));
            delete_at(&mut root, &segs("/a/b"), mode, "/a/b").unwrap();
            assert_eq!(root, Some(json!({"a": {"c": 2}})));
        }
    }

    #[test]
    fn test_delete_unresolvable_path() {
        let mut root = Some(json!({"a": 1}));
        let err = delete_at(&mut root, &segs("/b"), DeleteMode::Value, "/b").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));

        let err = delete_at(&mut root, &segs("/a/b"), DeleteMode::Value, "/a/b").unwrap_err();
        assert_eq!(err, Error::PathTooLong { path: "/a/b".into() });
    }

    #[test]
    fn test_delete_root_clears_document() {
        let mut root = Some(json!({"a": 1}));
        delete_at(&mut root, &[], DeleteMode::Element, "/").unwrap();
        assert_eq!(root, None);
    }
}
