//! Path-addressed processing of dynamically-typed JSON documents.
//!
//! A [`Document`] owns the decoded form of a JSON value — a heterogeneous
//! tree of objects, arrays, and leaf values — and gives slash-delimited
//! path access to it: reading, writing (with auto-creation of intermediate
//! structure), deleting, recursive visiting, glob queries, and two-document
//! diffing.
//!
//! # Example
//!
//! ```
//! use dynadoc::{Diff, Document};
//! use serde_json::json;
//!
//! let mut doc = Document::new();
//! doc.set_value_at("/a/b/x", json!(1))?;
//! doc.set_value_at("/a/d/0/z", json!(47.11))?;
//! doc.set_value_at("/a/d/1/z", json!(null))?;
//!
//! assert_eq!(doc.length("/a/d"), 2);
//! assert_eq!(doc.value_at("/a/d/0/z").as_float(0.0), 47.11);
//!
//! // A null leaf resolves; only a missing path is an error.
//! assert!(!doc.value_at("/a/d/1/z").is_error());
//! assert!(doc.value_at("/a/d/9").is_error());
//!
//! // Every leaf path below /a/d:
//! let zs = doc.query("a/d/*")?;
//! assert_eq!(zs.len(), 2);
//!
//! let other = Document::from_value(json!({"a": {"b": {"x": 2}}}));
//! let diff = Diff::documents(doc, other)?;
//! assert!(diff.differences().contains(&"/a/b/x".to_string()));
//! # Ok::<(), dynadoc::Error>(())
//! ```

pub mod diff;
pub mod document;
pub mod error;
pub mod node;
pub mod path_value;

mod mutate;
mod process;
mod resolve;

pub use diff::Diff;
pub use document::Document;
pub use error::Error;
pub use path_value::{PathValue, PathValues};

// The path codec and glob pattern are a separate crate; re-exported here so
// callers only need one dependency.
pub use dynadoc_path as path;
pub use dynadoc_path::Pattern;
