//! Generic XML node tree: building, inspection and rendering.
//!
//! - [`Node`] - the in-memory element tree
//! - [`TreeBuilder`] / [`parse_bytes`] - markup to tree, driven by quick-xml
//! - [`to_xml_string`] / [`to_document_string`] - tree to markup
//!
//! Data flows `bytes -> TreeBuilder -> Node -> codec::Decoder -> model` and back
//! through `codec::Encoder -> Node -> writer`.

mod builder;
pub mod namespace;
mod node;
mod writer;

pub(crate) use builder::strip_bom;
pub use builder::{parse_bytes, parse_str, ParseError, TreeBuilder};
pub use node::{split_qualified, Node};
pub use writer::{escape, to_document_string, to_xml_string, write_node, WriteOptions};
