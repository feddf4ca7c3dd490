//! Typed RSS 2.0, Atom, RDF and JSON Feed documents.
//!
//! XML feeds go through a generic pipeline:
//!
//! ```text
//! bytes -> xml::TreeBuilder -> xml::Node -> codec::Decoder -> model
//! model -> codec::Encoder -> xml::Node -> xml::writer -> markup
//! ```
//!
//! The [`model`] types declare their element mapping with [`xml_record!`], so
//! the engine never inspects types at runtime. [`feed::Feed`] sniffs the
//! dialect and normalizes every format into a [`feed::SimpleFeed`].

pub mod codec;
pub mod config;
pub mod dates;
mod error;
pub mod feed;
pub mod model;
pub mod util;
pub mod xml;

pub use error::{Error, Result};
pub use feed::{Feed, FeedFormat};
