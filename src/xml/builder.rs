//! Builds a [`Node`] tree from markup.
//!
//! [`TreeBuilder`] is a small state machine fed with tokenizer events. It keeps a
//! stack of open elements, accumulates character data on the element at the top,
//! and attaches each closed element to its parent. [`parse_bytes`] drives it with
//! quick-xml.

use std::borrow::Cow;

use indexmap::IndexMap;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::Node;

/// Structural errors raised while turning markup into a tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The tokenizer rejected the markup.
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// An element or attribute name is not valid UTF-8.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// An attribute could not be read.
    #[error("Malformed attribute in <{element}>: {message}")]
    Attribute { element: String, message: String },

    /// A CDATA block is not valid UTF-8.
    #[error("Unable to decode CDATA in <{element}>")]
    CdataDecoding { element: String },

    /// Character data is not valid UTF-8.
    #[error("Unable to decode text in <{element}>")]
    TextDecoding { element: String },

    /// The document ended while `element` was still open.
    #[error("Unexpected end of document inside <{element}>")]
    UnexpectedEnd { element: String },

    /// Parsing stopped without a root element and without a recorded cause.
    #[error("Parsing aborted: document has no root element")]
    Aborted,
}

/// Event sink that assembles a [`Node`] tree.
///
/// Character data is concatenated in arrival order and trimmed once, when the
/// element closes; data that is only whitespace never becomes text. The first
/// error is kept and every later event is ignored. Once the root element closes
/// the builder is complete and further events, errors included, are ignored.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Node>,
    root: Option<Node>,
    error: Option<ParseError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root element has been closed.
    pub fn is_complete(&self) -> bool {
        self.root.is_some()
    }

    /// An error has been recorded.
    pub fn is_aborted(&self) -> bool {
        self.error.is_some()
    }

    fn accepting(&self) -> bool {
        !self.is_complete() && !self.is_aborted()
    }

    pub fn start_element(
        &mut self,
        qualified_name: &str,
        attributes: Option<IndexMap<String, String>>,
    ) {
        if !self.accepting() {
            return;
        }
        let mut node = Node::element(qualified_name);
        node.attributes = attributes;
        self.stack.push(node);
    }

    /// Appends character data to the open element. Data outside the root is dropped.
    pub fn characters(&mut self, text: &str) {
        if !self.accepting() || text.is_empty() {
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            top.append_text(text);
        }
    }

    /// Appends a CDATA block, which must be valid UTF-8.
    pub fn cdata(&mut self, bytes: &[u8]) {
        if !self.accepting() {
            return;
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => self.characters(text),
            Err(_) => {
                let element = self.current_element();
                self.error(ParseError::CdataDecoding { element });
            }
        }
    }

    pub fn end_element(&mut self) {
        if !self.accepting() {
            return;
        }
        let Some(mut node) = self.stack.pop() else {
            return;
        };
        node.text = node.text.take().and_then(|text| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.len() == text.len() {
                Some(text)
            } else {
                Some(trimmed.to_string())
            }
        });

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                tracing::debug!(root = %node.qualified_name(), "Document root closed");
                self.root = Some(node);
            }
        }
    }

    /// Records a tokenizer error. Errors after completion are ignored.
    pub fn error(&mut self, error: ParseError) {
        if self.is_complete() {
            tracing::trace!(error = %error, "Ignoring error after document root closed");
            return;
        }
        if self.error.is_none() {
            tracing::debug!(error = %error, "Aborting document parse");
            self.error = Some(error);
        }
    }

    /// Qualified name of the innermost open element, for error messages.
    pub fn current_element(&self) -> String {
        self.stack
            .last()
            .map(Node::qualified_name)
            .unwrap_or_default()
    }

    pub fn finish(self) -> Result<Node, ParseError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if let Some(root) = self.root {
            return Ok(root);
        }
        match self.stack.first() {
            Some(open) => Err(ParseError::UnexpectedEnd {
                element: open.qualified_name(),
            }),
            None => Err(ParseError::Aborted),
        }
    }
}

/// Parses markup into a tree.
///
/// Content after the closed root element is never read, so trailing junk does
/// not fail the parse.
pub fn parse_bytes(bytes: &[u8]) -> Result<Node, ParseError> {
    let bytes = strip_bom(bytes);
    let mut reader = Reader::from_reader(bytes);
    let mut builder = TreeBuilder::new();
    let mut buf = Vec::new();

    // SEC-002: quick-xml (0.37) never expands <!ENTITY> declarations; unknown
    // entity references are kept verbatim by `unescape_or_raw`.
    loop {
        if builder.is_complete() {
            tracing::trace!("Skipping content after document root");
            break;
        }
        if builder.is_aborted() {
            break;
        }

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match element_parts(&e, &reader) {
                Ok((name, attributes)) => builder.start_element(&name, attributes),
                Err(err) => builder.error(err),
            },
            Ok(Event::Empty(e)) => match element_parts(&e, &reader) {
                Ok((name, attributes)) => {
                    builder.start_element(&name, attributes);
                    builder.end_element();
                }
                Err(err) => builder.error(err),
            },
            Ok(Event::End(_)) => builder.end_element(),
            Ok(Event::Text(e)) => {
                let bytes: &[u8] = &e;
                match std::str::from_utf8(bytes) {
                    Ok(raw) => builder.characters(&unescape_or_raw(raw)),
                    Err(_) => {
                        let element = builder.current_element();
                        builder.error(ParseError::TextDecoding { element });
                    }
                }
            }
            Ok(Event::CData(e)) => {
                let bytes: &[u8] = &e;
                builder.cdata(bytes);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {
                // Declarations, processing instructions, comments and DOCTYPE carry no data
            }
            Err(e) => builder.error(ParseError::Syntax {
                position: u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX),
                message: e.to_string(),
            }),
        }
        buf.clear();
    }

    builder.finish()
}

/// Drops a leading UTF-8 byte order mark.
pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

/// Parses markup held in a string.
pub fn parse_str(xml: &str) -> Result<Node, ParseError> {
    parse_bytes(xml.as_bytes())
}

fn element_parts<R>(
    e: &BytesStart<'_>,
    reader: &Reader<R>,
) -> Result<(String, Option<IndexMap<String, String>>), ParseError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| ParseError::InvalidName(err.to_string()))?
        .to_string();

    let mut attributes: Option<IndexMap<String, String>> = None;
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|err| ParseError::Attribute {
            element: name.clone(),
            message: err.to_string(),
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| ParseError::InvalidName(err.to_string()))?
            .to_string();
        let value = match attr.decode_and_unescape_value(reader.decoder()) {
            Ok(value) => value.into_owned(),
            Err(_) => std::str::from_utf8(&attr.value)
                .map_err(|err| ParseError::Attribute {
                    element: name.clone(),
                    message: err.to_string(),
                })?
                .to_string(),
        };
        attributes
            .get_or_insert_with(IndexMap::new)
            .insert(key, value);
    }

    Ok((name, attributes))
}

/// Resolves the predefined entities, keeping the raw text when an unknown
/// entity (`&nbsp;` and friends are common in feeds) makes unescaping fail.
fn unescape_or_raw(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}
