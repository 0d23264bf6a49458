//! Resolution of segment sequences against a tree.

use serde_json::Value;

use crate::error::Error;

/// Walk `segments` down from the root and return the addressed node.
///
/// An empty segment list addresses the root itself; `Ok(None)` is the empty
/// document's root. Unknown keys and bad indices are [`Error::InvalidPath`]
/// with a detail naming the cause; segments left over below a leaf are
/// [`Error::PathTooLong`]. `path` is the canonical path string, used only
/// for failure messages.
pub(crate) fn node_at<'a>(
    root: Option<&'a Value>,
    segments: &[String],
    path: &str,
) -> Result<Option<&'a Value>, Error> {
    let Some(mut current) = root else {
        if segments.is_empty() {
            return Ok(None);
        }
        return Err(Error::empty_document(path));
    };
    for segment in segments {
        match current {
            Value::Object(map) => match map.get(segment) {
                Some(child) => current = child,
                None => return Err(Error::unknown_key(path, segment)),
            },
            Value::Array(items) => {
                let Some(index) = dynadoc_path::to_index(segment) else {
                    return Err(Error::not_an_index(path, segment));
                };
                match items.get(index) {
                    Some(child) => current = child,
                    None => return Err(Error::out_of_range(path, index)),
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                return Err(Error::PathTooLong {
                    path: path.to_string(),
                });
            }
        }
    }
    Ok(Some(current))
}
