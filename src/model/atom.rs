//! Atom 1.0 (RFC 4287).

use chrono::{DateTime, FixedOffset};

use super::ext::YouTube;
use super::XmlFeed;
use crate::codec::{
    DecodeError, Decoder, EncodeError, Encoder, KeyedEncoder, XmlDecodable, XmlEncodable,
    ATTRIBUTES_KEY, TEXT_KEY,
};
use crate::dates::DateFormat;
use crate::xml::{namespace, parse_str, to_xml_string, Node, WriteOptions};

crate::xml_record! {
    pub struct TextAttributes {
        /// `text`, `html` or `xhtml`.
        pub kind: Option<String> => optional "type",
    }
}

/// A text construct such as `<title type="html">`.
///
/// An `xhtml` construct carries markup instead of text. Its child elements are
/// kept in `value` as serialized XML and written back as elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub value: Option<String>,
    pub attributes: Option<TextAttributes>,
}

impl XmlDecodable for Text {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut container = decoder.keyed()?;
        let attributes = container.decode_if_present(ATTRIBUTES_KEY)?;
        let value = match container.decode_if_present::<String>(TEXT_KEY)? {
            Some(text) => Some(text),
            None => markup(container.node()),
        };
        Ok(Self { value, attributes })
    }
}

impl XmlEncodable for Text {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        let mut container = encoder.keyed();
        container.encode_if_present(ATTRIBUTES_KEY, &self.attributes)?;
        let kind = self.attributes.as_ref().and_then(|a| a.kind.as_deref());
        encode_value(&mut container, kind, &self.value)
    }
}

crate::xml_record! {
    pub struct LinkAttributes {
        pub href: Option<String> => optional "href",
        pub rel: Option<String> => optional "rel",
        pub kind: Option<String> => optional "type",
        pub hreflang: Option<String> => optional "hreflang",
        pub title: Option<String> => optional "title",
        pub length: Option<u64> => optional "length",
    }
}

crate::xml_record! {
    pub struct Link {
        pub attributes: Option<LinkAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct Person {
        pub name: Option<String> => optional "name",
        pub email: Option<String> => optional "email",
        pub uri: Option<String> => optional "uri",
    }
}

crate::xml_record! {
    pub struct CategoryAttributes {
        pub term: Option<String> => optional "term",
        pub scheme: Option<String> => optional "scheme",
        pub label: Option<String> => optional "label",
    }
}

crate::xml_record! {
    pub struct Category {
        pub attributes: Option<CategoryAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct GeneratorAttributes {
        pub uri: Option<String> => optional "uri",
        pub version: Option<String> => optional "version",
    }
}

crate::xml_record! {
    pub struct Generator {
        pub value: Option<String> => optional "@text",
        pub attributes: Option<GeneratorAttributes> => optional "@attributes",
    }
}

crate::xml_record! {
    pub struct ContentAttributes {
        pub kind: Option<String> => optional "type",
        pub src: Option<String> => optional "src",
    }
}

/// Entry content; inline text, escaped HTML, xhtml markup or a `src` reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Content {
    pub value: Option<String>,
    pub attributes: Option<ContentAttributes>,
}

impl XmlDecodable for Content {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut container = decoder.keyed()?;
        let attributes = container.decode_if_present(ATTRIBUTES_KEY)?;
        let value = match container.decode_if_present::<String>(TEXT_KEY)? {
            Some(text) => Some(text),
            None => markup(container.node()),
        };
        Ok(Self { value, attributes })
    }
}

impl XmlEncodable for Content {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        let mut container = encoder.keyed();
        container.encode_if_present(ATTRIBUTES_KEY, &self.attributes)?;
        let kind = self.attributes.as_ref().and_then(|a| a.kind.as_deref());
        encode_value(&mut container, kind, &self.value)
    }
}

/// Child elements of `node` serialized back to back, or `None` if it has none.
fn markup(node: &Node) -> Option<String> {
    if node.children.is_empty() {
        return None;
    }
    let options = WriteOptions::compact();
    Some(
        node.children
            .iter()
            .map(|child| to_xml_string(child, &options))
            .collect(),
    )
}

/// Elements parsed back out of an xhtml `value`. Text that is not a
/// well-formed run of elements stays text.
fn xhtml_elements(value: &str) -> Option<Vec<Node>> {
    let wrapper = parse_str(&format!("<xhtml>{value}</xhtml>")).ok()?;
    if wrapper.text.is_some() || wrapper.children.is_empty() {
        return None;
    }
    Some(wrapper.children)
}

fn encode_value(
    container: &mut KeyedEncoder<'_>,
    kind: Option<&str>,
    value: &Option<String>,
) -> Result<(), EncodeError> {
    let elements = match (kind, value) {
        (Some("xhtml"), Some(value)) => xhtml_elements(value),
        _ => None,
    };
    match elements {
        Some(elements) => {
            for element in &elements {
                container.encode(&element.qualified_name(), element)?;
            }
            Ok(())
        }
        None => container.encode_if_present(TEXT_KEY, value),
    }
}

crate::xml_record! {
    /// Metadata of the feed an entry was copied from.
    pub struct Source {
        pub id: Option<String> => optional "id",
        pub title: Option<Text> => optional "title",
        pub updated: Option<DateTime<FixedOffset>> => optional "updated",
        pub links: Vec<Link> => many "link",
    }
}

crate::xml_record! {
    pub struct Entry {
        pub title: Option<Text> => optional "title",
        pub id: Option<String> => optional "id",
        pub updated: Option<DateTime<FixedOffset>> => optional "updated",
        pub published: Option<DateTime<FixedOffset>> => optional "published",
        pub links: Vec<Link> => many "link",
        pub authors: Vec<Person> => many "author",
        pub contributors: Vec<Person> => many "contributor",
        pub categories: Vec<Category> => many "category",
        pub summary: Option<Text> => optional "summary",
        pub content: Option<Content> => optional "content",
        pub rights: Option<Text> => optional "rights",
        pub source: Option<Source> => optional "source",
        pub youtube: Option<YouTube> => optional "youtube",
    }
}

crate::xml_record! {
    /// The `<feed>` document element.
    pub struct AtomFeed {
        pub title: Option<Text> => optional "title",
        pub subtitle: Option<Text> => optional "subtitle",
        pub id: Option<String> => optional "id",
        pub updated: Option<DateTime<FixedOffset>> => optional "updated",
        pub links: Vec<Link> => many "link",
        pub authors: Vec<Person> => many "author",
        pub contributors: Vec<Person> => many "contributor",
        pub categories: Vec<Category> => many "category",
        pub generator: Option<Generator> => optional "generator",
        pub icon: Option<String> => optional "icon",
        pub logo: Option<String> => optional "logo",
        pub rights: Option<Text> => optional "rights",
        pub youtube: Option<YouTube> => optional "youtube",
        pub entries: Vec<Entry> => many "entry",
    }
}

impl XmlFeed for AtomFeed {
    const ROOT: &'static str = "feed";
    const DATE_FORMAT: DateFormat = DateFormat::Rfc3339;
    const DEFAULT_NAMESPACE: Option<&'static str> = Some(namespace::ATOM);
}

impl Text {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            attributes: None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Link {
    pub fn new(href: impl Into<String>, rel: Option<&str>) -> Self {
        Self {
            attributes: Some(LinkAttributes {
                href: Some(href.into()),
                rel: rel.map(str::to_string),
                ..LinkAttributes::default()
            }),
        }
    }

    pub fn href(&self) -> Option<&str> {
        self.attributes.as_ref().and_then(|a| a.href.as_deref())
    }

    /// The link relation; Atom treats a missing `rel` as `alternate`.
    pub fn rel(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|a| a.rel.as_deref())
            .unwrap_or("alternate")
    }
}

/// The `alternate` link among `links`, or the first one.
pub fn primary_link(links: &[Link]) -> Option<&str> {
    links
        .iter()
        .find(|link| link.rel() == "alternate")
        .or_else(|| links.first())
        .and_then(Link::href)
}
