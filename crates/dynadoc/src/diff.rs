//! Value-level comparison of two documents.

use std::collections::HashSet;

use crate::document::Document;
use crate::error::Error;
use crate::path_value::PathValue;

/// The differences between two documents.
///
/// A difference is a path at which the two trees disagree: the leaf (or
/// empty container) values differ, or the path exists in only one tree.
/// This reports *where* the trees disagree, not how to transform one into
/// the other.
///
/// # Example
///
/// ```
/// use dynadoc::Diff;
///
/// let diff = Diff::compare(br#"{"a":1}"#, br#"{"a":2,"b":3}"#)?;
/// assert_eq!(diff.differences(), ["/a", "/b"]);
/// # Ok::<(), dynadoc::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Diff {
    first: Document,
    second: Document,
    paths: Vec<String>,
}

impl Diff {
    /// Decode and compare two JSON documents.
    pub fn compare(first: &[u8], second: &[u8]) -> Result<Self, Error> {
        Self::documents(Document::parse(first)?, Document::parse(second)?)
    }

    /// Compare two already-built documents.
    pub fn documents(first: Document, second: Document) -> Result<Self, Error> {
        let paths = compare(&first, &second)?;
        Ok(Diff {
            first,
            second,
            paths,
        })
    }

    /// The first compared document.
    pub fn first_document(&self) -> &Document {
        &self.first
    }

    /// The second compared document.
    pub fn second_document(&self) -> &Document {
        &self.second
    }

    /// The paths at which the documents differ, in visitation order of the
    /// first document followed by paths only the second one has.
    pub fn differences(&self) -> &[String] {
        &self.paths
    }

    /// Both documents' values at a path, first and second.
    pub fn difference_at(&self, path: &str) -> (PathValue, PathValue) {
        (self.first.value_at(path), self.second.value_at(path))
    }
}

/// Two-pass walk: every path of `first` that is absent from or different
/// in `second`, then every path only `second` has.
fn compare(first: &Document, second: &Document) -> Result<Vec<String>, Error> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();
    first.process(|value| {
        seen.insert(value.path().to_string());
        if !value.equals(&second.value_at(value.path())) {
            paths.push(value.path().to_string());
        }
        Ok(())
    })?;
    second.process(|value| {
        if !seen.contains(value.path()) {
            paths.push(value.path().to_string());
        }
        Ok(())
    })?;
    Ok(paths)
}
