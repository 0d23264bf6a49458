//! Depth-first traversal and single-level iteration.

use serde_json::Value;

use crate::error::Error;
use crate::node;
use crate::path_value::PathValue;

/// Walk a subtree depth-first, invoking the visitor once per leaf and once
/// per empty container, each time with the full canonical path.
///
/// The first visitor failure aborts the walk and comes back wrapped as
/// [`Error::Process`] naming the failing sub-path. Sibling visitation order
/// for objects follows map iteration order and is not part of the
/// contract.
pub(crate) fn walk<F>(
    current: &Value,
    segments: &mut Vec<String>,
    separator: char,
    visitor: &mut F,
) -> Result<(), Error>
where
    F: FnMut(&PathValue) -> Result<(), Error>,
{
    match current {
        Value::Object(map) => {
            if map.is_empty() {
                return visit(current, segments, separator, visitor);
            }
            for (key, child) in map {
                segments.push(key.clone());
                let result = walk(child, segments, separator, visitor);
                segments.pop();
                result?;
            }
            Ok(())
        }
        Value::Array(items) => {
            if items.is_empty() {
                return visit(current, segments, separator, visitor);
            }
            for (index, child) in items.iter().enumerate() {
                segments.push(index.to_string());
                let result = walk(child, segments, separator, visitor);
                segments.pop();
                result?;
            }
            Ok(())
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            visit(current, segments, separator, visitor)
        }
    }
}

/// Iterate one level below the addressed node.
///
/// A leaf is visited once with its own path. A container's children are
/// each visited, but a child that is itself a container fails the whole
/// call: flattening nested structure into one level would silently drop
/// data.
pub(crate) fn range_over<F>(
    current: &Value,
    segments: &[String],
    separator: char,
    visitor: &mut F,
) -> Result<(), Error>
where
    F: FnMut(&PathValue) -> Result<(), Error>,
{
    match current {
        Value::Object(map) => {
            for (key, child) in map {
                range_child(child, segments, key.clone(), separator, visitor)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                range_child(child, segments, index.to_string(), separator, visitor)?;
            }
            Ok(())
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            let mut segments = segments.to_vec();
            visit(current, &mut segments, separator, visitor)
        }
    }
}

fn range_child<F>(
    child: &Value,
    segments: &[String],
    key: String,
    separator: char,
    visitor: &mut F,
) -> Result<(), Error>
where
    F: FnMut(&PathValue) -> Result<(), Error>,
{
    let mut child_segments = segments.to_vec();
    child_segments.push(key);
    if node::is_container(child) {
        return Err(Error::RangeContainer {
            path: dynadoc_path::join(&child_segments, separator),
        });
    }
    visit(child, &mut child_segments, separator, visitor)
}

fn visit<F>(
    current: &Value,
    segments: &mut Vec<String>,
    separator: char,
    visitor: &mut F,
) -> Result<(), Error>
where
    F: FnMut(&PathValue) -> Result<(), Error>,
{
    let path = dynadoc_path::join(segments, separator);
    let value = PathValue::found(path.clone(), current.clone(), separator);
    visitor(&value).map_err(|err| Error::Process {
        path,
        source: Box::new(err),
    })
}
