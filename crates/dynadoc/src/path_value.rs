//! The combination of a path and what was found there.

use std::fmt;

use serde_json::Value;

use crate::error::Error;

/// Result of a lookup or traversal step: a canonical path, the node found
/// there (if any), and the failure that prevented resolution (if any).
///
/// Three states are distinguishable: a resolved node (which may well be a
/// JSON `null` leaf), an undefined value (nothing there, no failure — e.g.
/// the root of an empty document), and a failure (the path did not
/// resolve).
#[derive(Debug, Clone, PartialEq)]
pub struct PathValue {
    path: String,
    node: Option<Value>,
    err: Option<Error>,
    separator: char,
}

/// An ordered list of path values, as produced by queries.
pub type PathValues = Vec<PathValue>;

impl PathValue {
    pub(crate) fn found(path: String, node: Value, separator: char) -> Self {
        PathValue {
            path,
            node: Some(node),
            err: None,
            separator,
        }
    }

    pub(crate) fn undefined(path: String, separator: char) -> Self {
        PathValue {
            path,
            node: None,
            err: None,
            separator,
        }
    }

    pub(crate) fn failed(path: String, err: Error, separator: char) -> Self {
        PathValue {
            path,
            node: None,
            err: Some(err),
            separator,
        }
    }

    /// The canonical path of this value.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path split into its segments.
    pub fn split_path(&self) -> Vec<String> {
        dynadoc_path::split(&self.path, self.separator)
    }

    /// The resolved node, if any.
    pub fn value(&self) -> Option<&Value> {
        self.node.as_ref()
    }

    /// True if nothing was found and no failure occurred.
    pub fn is_undefined(&self) -> bool {
        self.node.is_none() && self.err.is_none()
    }

    /// True if the lookup failed.
    pub fn is_error(&self) -> bool {
        self.err.is_some()
    }

    /// The failure, if any.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// The value as a string, with a default for anything that is not a
    /// scalar.
    pub fn as_string(&self, default: &str) -> String {
        match &self.node {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    /// The value as an integer. Strings parse, floats truncate, booleans
    /// map to 1/0; everything else yields the default.
    pub fn as_int(&self, default: i64) -> i64 {
        match &self.node {
            Some(Value::String(s)) => s.parse().unwrap_or(default),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => i,
                None => n.as_f64().map(|f| f as i64).unwrap_or(default),
            },
            Some(Value::Bool(b)) => i64::from(*b),
            _ => default,
        }
    }

    /// The value as a float. Strings parse, booleans map to 1.0/0.0;
    /// everything else yields the default.
    pub fn as_float(&self, default: f64) -> f64 {
        match &self.node {
            Some(Value::String(s)) => s.parse().unwrap_or(default),
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::Bool(b)) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            _ => default,
        }
    }

    /// The value as a boolean. `"true"`/`"false"` and `"1"`/`"0"` strings
    /// parse, numbers are true iff exactly 1; everything else yields the
    /// default.
    pub fn as_bool(&self, default: bool) -> bool {
        match &self.node {
            Some(Value::String(s)) => match s.as_str() {
                "1" => true,
                "0" => false,
                other => other.parse().unwrap_or(default),
            },
            Some(Value::Number(n)) => n.as_f64().map(|f| f == 1.0).unwrap_or(default),
            Some(Value::Bool(b)) => *b,
            _ => default,
        }
    }

    /// Deep structural equality with another path value.
    ///
    /// Two undefined values are equal; an undefined value never equals a
    /// resolved one (in particular not a `null` leaf); failed lookups are
    /// never equal to anything.
    pub fn equals(&self, other: &PathValue) -> bool {
        if self.err.is_some() || other.err.is_some() {
            return false;
        }
        match (&self.node, &other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(err) = &self.err {
            return write!(f, "error: {err}");
        }
        match &self.node {
            None => f.write_str("null"),
            Some(node) => match serde_json::to_string(node) {
                Ok(rendered) => f.write_str(&rendered),
                Err(_) => f.write_str("null"),
            },
        }
    }
}
