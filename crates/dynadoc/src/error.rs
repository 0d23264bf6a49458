//! Failure kinds of the document engine.

use thiserror::Error;

/// Everything that can go wrong while decoding, addressing, mutating,
/// traversing, or comparing a document.
///
/// Every variant renders the offending path, so a misconfigured path is
/// diagnosable from the message alone. Failures are always returned to the
/// immediate caller; nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input bytes; fatal to that decode call only.
    #[error("cannot decode document: {0}")]
    Decode(String),

    /// The document tree could not be rendered back to bytes.
    #[error("cannot encode document: {0}")]
    Encode(String),

    /// The path does not resolve against the current tree. The detail
    /// distinguishes unknown keys, non-numeric indices, and out-of-range
    /// indices.
    #[error("cannot find value at {path:?}: {detail}")]
    InvalidPath { path: String, detail: String },

    /// Segments remain below a leaf value; a value has no children to
    /// descend into.
    #[error("path {path:?} is too long")]
    PathTooLong { path: String },

    /// The write would replace a container with a leaf or vice versa.
    #[error("cannot insert value at {path:?}: setting value corrupts document")]
    CorruptsDocument { path: String },

    /// A write addressed an array with a negative index segment.
    #[error("cannot insert value at {path:?}: negative index {index}")]
    NegativeIndex { path: String, index: i64 },

    /// A write addressed an array with a segment that is not an index.
    #[error("cannot insert value at {path:?}: invalid index {segment:?}")]
    InvalidIndex { path: String, segment: String },

    /// Single-level iteration hit a child that is itself a container.
    #[error("cannot process {path:?}: is object or array")]
    RangeContainer { path: String },

    /// A visitor callback failed; the traversal was aborted at this path.
    #[error("cannot process {path:?}: {source}")]
    Process {
        path: String,
        #[source]
        source: Box<Error>,
    },

    /// Free-form failure raised by a caller-supplied visitor.
    #[error("{0}")]
    Failure(String),
}

impl Error {
    /// Build a [`Error::Failure`] from any message; convenience for
    /// visitors that want to abort a traversal.
    pub fn failure(message: impl Into<String>) -> Self {
        Error::Failure(message.into())
    }

    pub(crate) fn unknown_key(path: &str, key: &str) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            detail: format!("unknown key {key:?}"),
        }
    }

    pub(crate) fn not_an_index(path: &str, segment: &str) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            detail: format!("{segment:?} is not an index"),
        }
    }

    pub(crate) fn out_of_range(path: &str, index: usize) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            detail: format!("index {index} out of range"),
        }
    }

    pub(crate) fn empty_document(path: &str) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            detail: "document is empty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_the_path() {
        let err = Error::unknown_key("/a/b", "b");
        assert_eq!(err.to_string(), r#"cannot find value at "/a/b": unknown key "b""#);

        let err = Error::CorruptsDocument { path: "/a/d".into() };
        assert!(err.to_string().contains("cannot insert value"));
        assert!(err.to_string().contains("corrupts document"));
        assert!(err.to_string().contains("/a/d"));

        let err = Error::NegativeIndex { path: "/a/d/-1".into(), index: -1 };
        assert!(err.to_string().contains("negative index -1"));
    }

    #[test]
    fn test_process_wraps_the_inner_failure() {
        let err = Error::Process {
            path: "/a".into(),
            source: Box::new(Error::failure("ouch")),
        };
        assert_eq!(err.to_string(), r#"cannot process "/a": ouch"#);
    }
}
