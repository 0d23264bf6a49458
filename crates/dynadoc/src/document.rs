//! The document: one owned tree plus its path separator.

use std::fmt;

use serde_json::Value;

use crate::error::Error;
use crate::mutate::{self, DeleteMode};
use crate::node;
use crate::path_value::{PathValue, PathValues};
use crate::process;
use crate::resolve;

/// One dynamically-typed document.
///
/// A document owns exactly one root node, or none (the empty document),
/// and the separator its paths use, fixed at creation time. All reads and
/// writes address nodes with separator-delimited path strings like
/// `/a/b/3/c`; paths are canonicalized on entry, so a missing leading
/// separator or doubled separators are harmless.
///
/// # Example
///
/// ```
/// use dynadoc::Document;
/// use serde_json::json;
///
/// let mut doc = Document::new();
/// doc.set_value_at("/user/name", json!("alice"))?;
/// doc.set_value_at("/user/logins/2", json!(true))?;
///
/// assert_eq!(doc.value_at("/user/name").as_string(""), "alice");
/// // The logins array was grown with null holes.
/// assert_eq!(doc.length("/user/logins"), 3);
/// # Ok::<(), dynadoc::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    root: Option<Value>,
    separator: char,
}

impl Document {
    /// Create an empty document with the default separator.
    pub fn new() -> Self {
        Self::with_separator(dynadoc_path::SEPARATOR)
    }

    /// Create an empty document with a custom separator.
    pub fn with_separator(separator: char) -> Self {
        Document {
            root: None,
            separator,
        }
    }

    /// Decode a document from JSON bytes.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        Self::parse_with_separator(data, dynadoc_path::SEPARATOR)
    }

    /// Decode a document from JSON bytes with a custom separator.
    pub fn parse_with_separator(data: &[u8], separator: char) -> Result<Self, Error> {
        let root = serde_json::from_slice(data).map_err(|err| Error::Decode(err.to_string()))?;
        Ok(Document {
            root: Some(root),
            separator,
        })
    }

    /// Adopt an already-built tree as the document root.
    pub fn from_value(value: Value) -> Self {
        Self::from_value_with_separator(value, dynadoc_path::SEPARATOR)
    }

    /// Adopt an already-built tree with a custom separator.
    pub fn from_value_with_separator(value: Value, separator: char) -> Self {
        Document {
            root: Some(value),
            separator,
        }
    }

    /// The separator this document's paths use.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// True if the document holds no tree at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop the tree; the separator is kept.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// The whole tree as a [`PathValue`] at the root path.
    pub fn root(&self) -> PathValue {
        let path = dynadoc_path::join(&[] as &[&str], self.separator);
        match &self.root {
            Some(node) => PathValue::found(path, node.clone(), self.separator),
            None => PathValue::undefined(path, self.separator),
        }
    }

    /// Encode the document back to JSON bytes. The empty document encodes
    /// as `null`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let root = self.root.as_ref().unwrap_or(&Value::Null);
        serde_json::to_vec(root).map_err(|err| Error::Encode(err.to_string()))
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// Look up the node at a path.
    ///
    /// Failures do not propagate; they ride inside the returned
    /// [`PathValue`], so chained accessors like
    /// `doc.value_at("/a").as_int(0)` stay ergonomic.
    pub fn value_at(&self, path: &str) -> PathValue {
        let segments = dynadoc_path::split(path, self.separator);
        let canonical = dynadoc_path::join(&segments, self.separator);
        match resolve::node_at(self.root.as_ref(), &segments, &canonical) {
            Ok(Some(found)) => PathValue::found(canonical, found.clone(), self.separator),
            Ok(None) => PathValue::undefined(canonical, self.separator),
            Err(err) => PathValue::failed(canonical, err, self.separator),
        }
    }

    /// Number of elements at a path: member/element count for containers,
    /// 1 for a leaf, and -1 for anything that does not resolve.
    pub fn length(&self, path: &str) -> i64 {
        let segments = dynadoc_path::split(path, self.separator);
        let canonical = dynadoc_path::join(&segments, self.separator);
        match resolve::node_at(self.root.as_ref(), &segments, &canonical) {
            Ok(Some(found)) => node::element_count(found) as i64,
            Ok(None) | Err(_) => -1,
        }
    }

    // ── Writes ───────────────────────────────────────────────────────────

    /// Set the value at a path, creating intermediate objects and arrays
    /// as needed and growing arrays with `null` holes.
    ///
    /// The empty (root) path replaces the whole tree. A write that would
    /// turn an existing container into a leaf or descend through a scalar
    /// fails with [`Error::CorruptsDocument`].
    pub fn set_value_at(&mut self, path: &str, value: impl Into<Value>) -> Result<(), Error> {
        let segments = dynadoc_path::split(path, self.separator);
        let canonical = dynadoc_path::join(&segments, self.separator);
        mutate::set_at(&mut self.root, &segments, value.into(), &canonical)
    }

    /// Delete the value at a path. An object key is removed; an array slot
    /// is reset to `null` so sibling indices survive. The root path clears
    /// the document.
    pub fn delete_value_at(&mut self, path: &str) -> Result<(), Error> {
        self.delete(path, DeleteMode::Value)
    }

    /// Delete the element at a path wholesale. An object key is removed;
    /// an array is spliced and re-indexed. The root path clears the
    /// document.
    pub fn delete_element_at(&mut self, path: &str) -> Result<(), Error> {
        self.delete(path, DeleteMode::Element)
    }

    fn delete(&mut self, path: &str, mode: DeleteMode) -> Result<(), Error> {
        let segments = dynadoc_path::split(path, self.separator);
        let canonical = dynadoc_path::join(&segments, self.separator);
        mutate::delete_at(&mut self.root, &segments, mode, &canonical)
    }

    // ── Traversal ────────────────────────────────────────────────────────

    /// Walk the whole tree depth-first.
    ///
    /// The visitor runs once per leaf and once per empty container; its
    /// first failure aborts the walk, wrapped with the failing sub-path.
    /// An empty document visits nothing.
    pub fn process<F>(&self, mut visitor: F) -> Result<(), Error>
    where
        F: FnMut(&PathValue) -> Result<(), Error>,
    {
        let Some(root) = self.root.as_ref() else {
            return Ok(());
        };
        let mut segments = Vec::new();
        process::walk(root, &mut segments, self.separator, &mut visitor)
    }

    /// Walk the subtree below a path depth-first, reporting full paths.
    pub fn process_at<F>(&self, path: &str, mut visitor: F) -> Result<(), Error>
    where
        F: FnMut(&PathValue) -> Result<(), Error>,
    {
        let mut segments = dynadoc_path::split(path, self.separator);
        let canonical = dynadoc_path::join(&segments, self.separator);
        match resolve::node_at(self.root.as_ref(), &segments, &canonical)? {
            Some(found) => process::walk(found, &mut segments, self.separator, &mut visitor),
            None => Ok(()),
        }
    }

    /// Visit the immediate children of the node at a path.
    ///
    /// A leaf is visited once with its own path; a container child fails
    /// the call with [`Error::RangeContainer`], since flattening nested
    /// structure into one level would silently drop data.
    pub fn range<F>(&self, path: &str, mut visitor: F) -> Result<(), Error>
    where
        F: FnMut(&PathValue) -> Result<(), Error>,
    {
        let segments = dynadoc_path::split(path, self.separator);
        let canonical = dynadoc_path::join(&segments, self.separator);
        match resolve::node_at(self.root.as_ref(), &segments, &canonical)? {
            Some(found) => process::range_over(found, &segments, self.separator, &mut visitor),
            None => Ok(()),
        }
    }

    /// Collect every value in the document whose path matches a glob
    /// pattern (`*` and `[...]`, case-sensitive).
    ///
    /// The pattern and the visited paths are compared with the leading
    /// separator stripped, so `"/a/*"` and `"a/*"` are the same query.
    pub fn query(&self, pattern: &str) -> Result<PathValues, Error> {
        self.query_at("", pattern)
    }

    /// Like [`Document::query`], but matching paths relative to the given
    /// starting path. Reported paths stay absolute.
    pub fn query_at(&self, path: &str, pattern: &str) -> Result<PathValues, Error> {
        let base_depth = dynadoc_path::split(path, self.separator).len();
        let separator = self.separator.to_string();
        let normalized = pattern.strip_prefix(self.separator).unwrap_or(pattern);
        let matcher = dynadoc_path::Pattern::new(normalized);
        let mut found = PathValues::new();
        self.process_at(path, |value| {
            let relative = value.split_path()[base_depth..].join(separator.as_str());
            if matcher.matches(&relative) {
                found.push(value.clone());
            }
            Ok(())
        })?;
        Ok(found)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root.as_ref().unwrap_or(&Value::Null);
        match serde_json::to_string(root) {
            Ok(rendered) => f.write_str(&rendered),
            Err(err) => write!(f, "cannot encode document: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_failure() {
        let err = Document::parse(b"abc{def").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().contains("cannot decode document"));
    }

    #[test]
    fn test_root_and_clear() {
        let mut doc = Document::from_value(json!({"a": 1}));
        assert!(!doc.is_empty());
        assert_eq!(doc.root().value(), Some(&json!({"a": 1})));

        doc.clear();
        assert!(doc.is_empty());
        assert!(doc.root().is_undefined());
        assert_eq!(doc.to_string(), "null");
    }

    #[test]
    fn test_value_at_failure_is_carried_not_thrown() {
        let doc = Document::from_value(json!({"a": 1}));
        let value = doc.value_at("/you-wont-find-me");
        assert!(value.is_error());
        assert!(!value.is_undefined());
        let message = value.err().map(ToString::to_string).unwrap_or_default();
        assert!(message.contains("cannot find value at"));
        assert!(message.contains("you-wont-find-me"));
    }

    #[test]
    fn test_paths_are_canonicalized() {
        let doc = Document::from_value(json!({"a": {"b": 7}}));
        assert_eq!(doc.value_at("a/b").as_int(0), 7);
        assert_eq!(doc.value_at("/a//b/").as_int(0), 7);
        assert_eq!(doc.value_at("a/b").path(), "/a/b");
    }

    #[test]
    fn test_custom_separator() {
        let mut doc = Document::with_separator('.');
        doc.set_value_at(".a.b", json!(1)).unwrap();
        assert_eq!(doc.value_at("a.b").as_int(0), 1);
        assert_eq!(doc.value_at("a.b").path(), ".a.b");
        // The default separator is just key content here.
        doc.set_value_at(".x/y", json!(2)).unwrap();
        assert_eq!(doc.value_at(".x/y").as_int(0), 2);
    }

    #[test]
    fn test_display_renders_compact_json() {
        let doc = Document::from_value(json!({"a": [1, null]}));
        assert_eq!(doc.to_string(), r#"{"a":[1,null]}"#);
    }
}
