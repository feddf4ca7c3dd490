use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};
use crate::xml::ParseError;

/// Errors from parsing, decoding or encoding a feed document.
#[derive(Debug, Error)]
pub enum Error {
    /// The markup is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Parse(#[from] ParseError),

    /// The document is well-formed but does not fit the feed model.
    #[error("Invalid feed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Cannot encode feed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Invalid JSON feed: {0}")]
    Json(#[from] serde_json::Error),

    /// The document element names none of the supported dialects.
    #[error("Unsupported feed format: {0}")]
    UnsupportedFormat(String),

    /// A dialect was decoded from a document with a different root.
    #[error("Expected <{expected}> document element, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
