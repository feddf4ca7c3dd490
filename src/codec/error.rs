use thiserror::Error;

use super::CodingPath;

/// Errors raised while reconstructing a typed value from a [`Node`](crate::xml::Node).
///
/// Every variant carries the coding path of the value that failed, so a
/// malformed `<pubDate>` inside the third item reads as
/// `channel.item[2].pubDate`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A required child element, attribute or text is absent.
    #[error("No value for key \"{key}\" at {path}")]
    KeyNotFound { key: String, path: CodingPath },

    /// Scalar text was expected but the element has none, or a sequence was
    /// read past its last element.
    #[error("Expected {expected} but found no value at {path}")]
    ValueNotFound {
        expected: &'static str,
        path: CodingPath,
    },

    /// The value is present but cannot be converted to the target type.
    #[error("{message} at {path}")]
    DataCorrupted { message: String, path: CodingPath },

    /// The value has a different shape than the target type expects.
    #[error("Expected {expected} but found {found} at {path}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        path: CodingPath,
    },
}

impl DecodeError {
    pub fn path(&self) -> &CodingPath {
        match self {
            Self::KeyNotFound { path, .. }
            | Self::ValueNotFound { path, .. }
            | Self::DataCorrupted { path, .. }
            | Self::TypeMismatch { path, .. } => path,
        }
    }
}

/// Errors raised while producing a [`Node`](crate::xml::Node) from a typed value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The value has no textual representation (non-finite floats).
    #[error("{message} at {path}")]
    InvalidValue { message: String, path: CodingPath },
}
