//! Format detection and a single entry point over all feed dialects.
//!
//! - [`Feed`] - one parsed document of any supported dialect
//! - [`SimpleFeed`] - the dialect-independent display model
//! - [`fetch_feed`] / [`fetch_all`] - download and parse over HTTP
//!
//! # Example
//!
//! ```
//! use syndkit::feed::{Feed, FeedFormat};
//!
//! let feed = Feed::parse(br#"<rss version="2.0"><channel><title>News</title></channel></rss>"#)?;
//! assert_eq!(feed.format(), FeedFormat::Rss);
//! assert_eq!(feed.simplify().title.as_deref(), Some("News"));
//! # Ok::<(), syndkit::Error>(())
//! ```

mod fetcher;
mod simple;

use std::fmt;
use std::path::Path;

use anyhow::Context;

pub use fetcher::{
    fetch_all, fetch_all_until, fetch_feed, read_feed_file, FetchError, FetchOutcome,
};
pub use simple::{SimpleFeed, SimpleItem};

use crate::error::{Error, Result};
use crate::model::{AtomFeed, JsonFeed, RdfFeed, RssFeed, XmlFeed};
use crate::xml::{parse_bytes, strip_bom, Node, WriteOptions};

/// The supported feed dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedFormat {
    Rss,
    Atom,
    Rdf,
    Json,
}

impl FeedFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rss => "RSS 2.0",
            Self::Atom => "Atom",
            Self::Rdf => "RSS 1.0 (RDF)",
            Self::Json => "JSON Feed",
        }
    }

    fn of_root(root: &Node) -> Result<Self> {
        if root.matches(RssFeed::ROOT) {
            Ok(Self::Rss)
        } else if root.matches(AtomFeed::ROOT) {
            Ok(Self::Atom)
        } else if root.matches(RdfFeed::ROOT) {
            Ok(Self::Rdf)
        } else {
            Err(unsupported_root(root))
        }
    }
}

fn unsupported_root(root: &Node) -> Error {
    Error::UnsupportedFormat(format!(
        "unknown document element <{}>",
        root.qualified_name()
    ))
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true when the first significant byte opens a JSON object.
fn looks_like_json(bytes: &[u8]) -> bool {
    strip_bom(bytes)
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'{')
}

/// Identifies the dialect of a document.
///
/// A document whose first significant character is `{` is JSON Feed; anything
/// else is parsed as XML and classified by its document element.
pub fn detect_format(bytes: &[u8]) -> Result<FeedFormat> {
    if looks_like_json(bytes) {
        return Ok(FeedFormat::Json);
    }
    FeedFormat::of_root(&parse_bytes(bytes)?)
}

/// A parsed document of one of the supported dialects.
#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    Rss(RssFeed),
    Atom(AtomFeed),
    Rdf(RdfFeed),
    Json(JsonFeed),
}

impl Feed {
    /// Detects the dialect and decodes the document.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if looks_like_json(bytes) {
            tracing::debug!(format = %FeedFormat::Json, "Detected feed format");
            return Ok(Self::Json(JsonFeed::from_json(strip_bom(bytes))?));
        }

        let root = parse_bytes(bytes)?;
        let feed = match FeedFormat::of_root(&root)? {
            FeedFormat::Rss => Self::Rss(RssFeed::from_node(&root)?),
            FeedFormat::Atom => Self::Atom(AtomFeed::from_node(&root)?),
            FeedFormat::Rdf => Self::Rdf(RdfFeed::from_node(&root)?),
            // No document element classifies as JSON.
            FeedFormat::Json => return Err(unsupported_root(&root)),
        };
        tracing::debug!(format = %feed.format(), "Detected feed format");
        Ok(feed)
    }

    pub fn format(&self) -> FeedFormat {
        match self {
            Self::Rss(_) => FeedFormat::Rss,
            Self::Atom(_) => FeedFormat::Atom,
            Self::Rdf(_) => FeedFormat::Rdf,
            Self::Json(_) => FeedFormat::Json,
        }
    }

    /// Re-encodes the feed in its own dialect. JSON Feed is pretty-printed when
    /// `options.formatted` is set.
    pub fn to_string(&self, options: &WriteOptions) -> Result<String> {
        match self {
            Self::Rss(feed) => feed.to_xml(options),
            Self::Atom(feed) => feed.to_xml(options),
            Self::Rdf(feed) => feed.to_xml(options),
            Self::Json(feed) => feed.to_json(options.formatted),
        }
    }

    pub fn simplify(&self) -> SimpleFeed {
        SimpleFeed::from(self)
    }
}

impl From<RssFeed> for Feed {
    fn from(feed: RssFeed) -> Self {
        Self::Rss(feed)
    }
}

impl From<AtomFeed> for Feed {
    fn from(feed: AtomFeed) -> Self {
        Self::Atom(feed)
    }
}

impl From<RdfFeed> for Feed {
    fn from(feed: RdfFeed) -> Self {
        Self::Rdf(feed)
    }
}

impl From<JsonFeed> for Feed {
    fn from(feed: JsonFeed) -> Self {
        Self::Json(feed)
    }
}

/// Reads and parses a feed file, attaching the path to any error.
pub fn parse_file(path: impl AsRef<Path>) -> anyhow::Result<Feed> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read feed file: {}", path.display()))?;
    Feed::parse(&bytes).with_context(|| format!("Failed to parse feed file: {}", path.display()))
}
