//! Typed schemas for the supported feed dialects.
//!
//! The XML dialects are declared with [`xml_record!`](crate::xml_record) and
//! share the [`XmlFeed`] entry points; JSON Feed goes through serde.

pub mod atom;
pub mod ext;
pub mod json;
pub mod rdf;
pub mod rss;

pub use atom::AtomFeed;
pub use json::JsonFeed;
pub use rdf::RdfFeed;
pub use rss::RssFeed;

use crate::codec::{Decoder, Encoder, XmlDecodable, XmlEncodable};
use crate::dates::{DateFormat, DateStrategy};
use crate::error::{Error, Result};
use crate::xml::{parse_bytes, to_document_string, Node, WriteOptions};

/// A document-level XML feed type.
pub trait XmlFeed: XmlDecodable + XmlEncodable {
    /// Qualified name of the document element.
    const ROOT: &'static str;

    /// Native date format of the dialect, used for every date field that does
    /// not carry its own.
    const DATE_FORMAT: DateFormat;

    /// Written as `xmlns` on the root when encoding.
    const DEFAULT_NAMESPACE: Option<&'static str> = None;

    fn date_strategy() -> DateStrategy {
        DateStrategy::Formatted(Self::DATE_FORMAT)
    }

    /// Decodes a parsed document. The root must be [`ROOT`](Self::ROOT).
    fn from_node(node: &Node) -> Result<Self> {
        if !node.matches(Self::ROOT) {
            return Err(Error::UnexpectedRoot {
                expected: Self::ROOT,
                found: node.qualified_name(),
            });
        }
        Ok(Decoder::new(Self::date_strategy()).decode(node)?)
    }

    fn from_xml(bytes: &[u8]) -> Result<Self> {
        let node = parse_bytes(bytes)?;
        Self::from_node(&node)
    }

    /// Encodes into a document tree with namespace declarations on the root.
    fn to_node(&self) -> Result<Node> {
        let mut node = Encoder::new(Self::date_strategy()).encode_document(self, Self::ROOT)?;
        if let Some(uri) = Self::DEFAULT_NAMESPACE {
            if node.attribute("xmlns").is_none() {
                node.set_attribute("xmlns", uri);
            }
        }
        Ok(node)
    }

    fn to_xml(&self, options: &WriteOptions) -> Result<String> {
        Ok(to_document_string(&self.to_node()?, options))
    }
}
