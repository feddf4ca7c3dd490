//! Stack-based decoder from a [`Node`] tree to typed values.
//!
//! The decoder owns an explicit stack of frames, one per nesting level. A type's
//! [`XmlDecodable::decode`] asks the decoder for a view of the frame on top:
//! a [`KeyedContainer`] for records, an [`UnkeyedContainer`] for runs of
//! same-named siblings, or a [`SingleValue`] for scalars. Each container call
//! that descends pushes a frame and pops it again on return, error or not, so a
//! caller may catch an error and retry the same key as a different type.

use std::any::type_name;

use chrono::{DateTime, FixedOffset};

use super::key::{ATTRIBUTES_KEY, TEXT_KEY};
use super::{CodingKey, CodingPath, DecodeError, XmlDecodable, XmlScalar};
use crate::dates::DateStrategy;
use crate::xml::{split_qualified, Node};

#[derive(Debug, Clone, Copy)]
enum Frame<'a> {
    /// An element. `prefix` is set while decoding a namespace wrapper and is
    /// applied to unqualified keys.
    Element {
        node: &'a Node,
        prefix: Option<&'static str>,
    },
    /// The attribute map of an element, read as a record.
    Attributes(&'a Node),
    /// Element text or an attribute value.
    Value(Option<&'a str>),
}

impl Frame<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Element { .. } => "element",
            Self::Attributes(_) => "attributes",
            Self::Value(_) => "text",
        }
    }
}

/// Decodes values from one borrowed tree.
///
/// A decoder is cheap and owned by a single decode call; concurrent decodes
/// each use their own.
#[derive(Debug)]
pub struct Decoder<'a> {
    stack: Vec<Frame<'a>>,
    path: CodingPath,
    date_strategy: DateStrategy,
}

impl<'a> Decoder<'a> {
    pub fn new(date_strategy: DateStrategy) -> Self {
        Self {
            stack: Vec::new(),
            path: CodingPath::default(),
            date_strategy,
        }
    }

    pub fn date_strategy(&self) -> DateStrategy {
        self.date_strategy
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    /// Decodes `node` as a `T`.
    pub fn decode<T: XmlDecodable>(&mut self, node: &'a Node) -> Result<T, DecodeError> {
        self.with_frame(Frame::Element { node, prefix: None }, None, T::decode)
    }

    fn with_frame<T>(
        &mut self,
        frame: Frame<'a>,
        key: Option<CodingKey>,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        self.stack.push(frame);
        let pushed_key = key.is_some();
        if let Some(key) = key {
            self.path.push(key);
        }

        let result = f(self);

        if pushed_key {
            self.path.pop();
        }
        self.stack.pop();
        result
    }

    fn top(&self) -> Result<Frame<'a>, DecodeError> {
        self.stack
            .last()
            .copied()
            .ok_or_else(|| self.corrupted("No value is being decoded"))
    }

    fn corrupted(&self, message: impl Into<String>) -> DecodeError {
        DecodeError::DataCorrupted {
            message: message.into(),
            path: self.path.clone(),
        }
    }

    /// A record view of the current element, or of its attributes.
    pub fn keyed(&mut self) -> Result<KeyedContainer<'_, 'a>, DecodeError> {
        let source = match self.top()? {
            Frame::Element { node, prefix } => Source::Element { node, prefix },
            Frame::Attributes(node) => Source::Attributes(node),
            frame @ Frame::Value(_) => {
                return Err(DecodeError::TypeMismatch {
                    expected: "element",
                    found: frame.kind(),
                    path: self.path.clone(),
                })
            }
        };
        Ok(KeyedContainer {
            decoder: self,
            source,
        })
    }

    /// A scalar view of the current element's text.
    ///
    /// Only an element with neither text nor children reads as nil. Markup
    /// where a scalar is expected has no value to read.
    pub fn single_value(&self) -> SingleValue<'_, 'a> {
        let (text, has_children) = match self.stack.last() {
            Some(Frame::Element { node, .. }) => {
                (node.text.as_deref(), !node.children.is_empty())
            }
            Some(Frame::Value(text)) => (*text, false),
            Some(Frame::Attributes(_)) | None => (None, false),
        };
        SingleValue {
            decoder: self,
            text,
            has_children,
        }
    }

    /// Reads the current text as a date according to the date strategy.
    pub fn decode_date(&self) -> Result<DateTime<FixedOffset>, DecodeError> {
        let text = self.single_value().text::<DateTime<FixedOffset>>()?;
        match self.date_strategy {
            DateStrategy::DeferredToDate => text
                .trim()
                .parse::<DateTime<FixedOffset>>()
                .map_err(|err| self.corrupted(format!("Invalid date {text:?}: {err}"))),
            DateStrategy::Formatted(format) => format
                .parse(text)
                .ok_or_else(|| self.corrupted("Unable to decode date with formatter")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Source<'a> {
    Element {
        node: &'a Node,
        prefix: Option<&'static str>,
    },
    Attributes(&'a Node),
}

/// Addresses an element's children and attributes by field name.
///
/// Key resolution:
/// - [`TEXT_KEY`] reads the element's own text
/// - [`ATTRIBUTES_KEY`] reads the attribute map as a nested record
/// - a key with a colon (`atom:link`) names a child literally
/// - any other key names a child, prefixed while inside a namespace wrapper
pub struct KeyedContainer<'d, 'a> {
    decoder: &'d mut Decoder<'a>,
    source: Source<'a>,
}

impl<'d, 'a> KeyedContainer<'d, 'a> {
    /// The element this container reads from.
    pub fn node(&self) -> &'a Node {
        match self.source {
            Source::Element { node, .. } | Source::Attributes(node) => node,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.decoder.path
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Raw attribute value of the current element.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node().attribute(name)
    }

    fn lookup(&self, key: &str) -> Option<Frame<'a>> {
        match self.source {
            Source::Attributes(node) => node.attribute(key).map(|v| Frame::Value(Some(v))),
            Source::Element { node, prefix } => match key {
                TEXT_KEY => node.text.as_deref().map(|t| Frame::Value(Some(t))),
                ATTRIBUTES_KEY => node
                    .attributes
                    .as_ref()
                    .filter(|attrs| !attrs.is_empty())
                    .map(|_| Frame::Attributes(node)),
                _ => find_child(node, key, prefix).map(|child| Frame::Element {
                    node: child,
                    prefix,
                }),
            },
        }
    }

    fn key_not_found(&self, key: &str) -> DecodeError {
        DecodeError::KeyNotFound {
            key: key.to_string(),
            path: self.decoder.path.clone(),
        }
    }

    /// Frame for a namespace wrapper: the current element itself, with its
    /// prefixed children addressed by unqualified keys.
    fn namespace_frame(&self, prefix: &'static str) -> Option<Frame<'a>> {
        match self.source {
            Source::Element { node, .. } if node.has_prefixed_child(prefix) => {
                Some(Frame::Element {
                    node,
                    prefix: Some(prefix),
                })
            }
            _ => None,
        }
    }

    /// Decodes a required value.
    pub fn decode<T: XmlDecodable>(&mut self, key: &str) -> Result<T, DecodeError> {
        let frame = match T::NAMESPACE {
            Some(prefix) => self.namespace_frame(prefix),
            None => self.lookup(key),
        };
        match frame {
            Some(frame) => self
                .decoder
                .with_frame(frame, Some(CodingKey::named(key)), T::decode),
            None => Err(self.key_not_found(key)),
        }
    }

    /// Decodes a value that may be absent. Empty scalar elements read as `None`.
    pub fn decode_if_present<T: XmlDecodable>(
        &mut self,
        key: &str,
    ) -> Result<Option<T>, DecodeError> {
        let frame = match T::NAMESPACE {
            Some(prefix) => self.namespace_frame(prefix),
            None => self.lookup(key),
        };
        match frame {
            Some(frame) => {
                self.decoder
                    .with_frame(frame, Some(CodingKey::named(key)), T::decode_optional)
            }
            None => Ok(None),
        }
    }

    /// Decodes every child named `key`, in document order.
    pub fn decode_vec<T: XmlDecodable>(&mut self, key: &str) -> Result<Vec<T>, DecodeError> {
        let mut container = self.unkeyed(key)?;
        let mut values = Vec::with_capacity(container.count());
        while !container.is_at_end() {
            values.push(container.decode_next()?);
        }
        Ok(values)
    }

    /// A sequence view over the children named `key`.
    pub fn unkeyed(&mut self, key: &str) -> Result<UnkeyedContainer<'_, 'a>, DecodeError> {
        let (node, prefix) = match self.source {
            Source::Element { node, prefix } => (node, prefix),
            Source::Attributes(_) => {
                return Err(DecodeError::TypeMismatch {
                    expected: "element",
                    found: "attributes",
                    path: self.decoder.path.clone(),
                })
            }
        };
        let nodes = node
            .children
            .iter()
            .filter(|c| key_matches(c, key, prefix))
            .collect();
        Ok(UnkeyedContainer {
            decoder: &mut *self.decoder,
            key: key.to_string(),
            nodes,
            prefix,
            cursor: 0,
        })
    }

    /// Reads the scalar at `key` straight from its text.
    ///
    /// An absent key fails with [`DecodeError::KeyNotFound`]; text that does not
    /// parse as `T` fails with [`DecodeError::DataCorrupted`].
    pub fn decode_scalar<T: XmlScalar>(&self, key: &str) -> Result<T, DecodeError> {
        let text = match self.lookup(key) {
            Some(Frame::Element { node, .. }) => node.text.as_deref(),
            Some(Frame::Value(text)) => text,
            Some(Frame::Attributes(_)) | None => None,
        };
        let Some(text) = text else {
            return Err(self.key_not_found(key));
        };
        T::from_xml_text(text).ok_or_else(|| DecodeError::DataCorrupted {
            message: format!("Cannot read {:?} as {} for key \"{key}\"", text, T::TYPE_NAME),
            path: self.decoder.path.clone(),
        })
    }
}

fn find_child<'a>(node: &'a Node, key: &str, prefix: Option<&str>) -> Option<&'a Node> {
    node.children.iter().find(|c| key_matches(c, key, prefix))
}

/// A qualified key names its child literally; an unqualified one picks up the
/// inherited namespace prefix.
fn key_matches(child: &Node, key: &str, prefix: Option<&str>) -> bool {
    let (key_prefix, local) = split_qualified(key);
    child.name == local && child.namespace_prefix.as_deref() == key_prefix.or(prefix)
}

/// Walks a run of same-named sibling elements with an explicit cursor.
pub struct UnkeyedContainer<'d, 'a> {
    decoder: &'d mut Decoder<'a>,
    key: String,
    nodes: Vec<&'a Node>,
    prefix: Option<&'static str>,
    cursor: usize,
}

impl UnkeyedContainer<'_, '_> {
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.nodes.len()
    }

    /// Decodes the element under the cursor and advances. Reading past the last
    /// element fails with [`DecodeError::ValueNotFound`].
    pub fn decode_next<T: XmlDecodable>(&mut self) -> Result<T, DecodeError> {
        let key = CodingKey::indexed(&self.key, self.cursor);
        let Some(node) = self.nodes.get(self.cursor).copied() else {
            return Err(DecodeError::ValueNotFound {
                expected: type_name::<T>(),
                path: self.decoder.path.with(key),
            });
        };
        let frame = Frame::Element {
            node,
            prefix: self.prefix,
        };
        let value = self.decoder.with_frame(frame, Some(key), T::decode)?;
        self.cursor += 1;
        Ok(value)
    }
}

/// The current element, cloned as a raw subtree.
impl XmlDecodable for Node {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.top()? {
            Frame::Element { node, .. } => Ok(node.clone()),
            frame => Err(DecodeError::TypeMismatch {
                expected: "element",
                found: frame.kind(),
                path: decoder.path.clone(),
            }),
        }
    }
}

/// Reads the current text as a scalar.
pub struct SingleValue<'d, 'a> {
    decoder: &'d Decoder<'a>,
    text: Option<&'a str>,
    has_children: bool,
}

impl<'a> SingleValue<'_, 'a> {
    pub fn is_nil(&self) -> bool {
        self.text.is_none() && !self.has_children
    }

    /// The raw text; fails with [`DecodeError::ValueNotFound`] when there is
    /// none, including an element that holds only child elements.
    pub fn text<T>(&self) -> Result<&'a str, DecodeError> {
        self.text.ok_or_else(|| DecodeError::ValueNotFound {
            expected: type_name::<T>(),
            path: self.decoder.path.clone(),
        })
    }

    pub fn decode<T: XmlScalar>(&self) -> Result<T, DecodeError> {
        let text = self.text::<T>()?;
        T::from_xml_text(text).ok_or_else(|| {
            self.decoder
                .corrupted(format!("Cannot read {:?} as {}", text, T::TYPE_NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateFormat;
    use crate::xml::parse_str;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Item {
        title: Option<String>,
        count: Option<u32>,
    }

    impl XmlDecodable for Item {
        fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
            let mut container = decoder.keyed()?;
            Ok(Self {
                title: container.decode_if_present("title")?,
                count: container.decode_if_present("count")?,
            })
        }
    }

    fn decoder<'a>() -> Decoder<'a> {
        Decoder::new(DateStrategy::DeferredToDate)
    }

    #[test]
    fn test_keyed_optional_fields() {
        let node = parse_str("<item><title>A</title><count>3</count></item>").unwrap();
        let item: Item = decoder().decode(&node).unwrap();
        assert_eq!(
            item,
            Item {
                title: Some("A".into()),
                count: Some(3)
            }
        );
    }

    #[test]
    fn test_missing_optional_is_none() {
        let node = parse_str("<item><title/></item>").unwrap();
        let item: Item = decoder().decode(&node).unwrap();
        assert_eq!(
            item,
            Item {
                title: None,
                count: None
            }
        );
    }

    #[test]
    fn test_malformed_number_names_path() {
        let node = parse_str("<item><count>many</count></item>").unwrap();
        let err = decoder().decode::<Item>(&node).unwrap_err();
        assert!(matches!(err, DecodeError::DataCorrupted { .. }));
        assert_eq!(err.path().to_string(), "count");
    }

    #[test]
    fn test_unkeyed_reads_in_order_and_fails_past_end() {
        let node = parse_str("<channel><item>a</item><x/><item>b</item></channel>").unwrap();
        let mut decoder = decoder();
        decoder
            .with_frame(Frame::Element { node: &node, prefix: None }, None, |d| {
                let mut keyed = d.keyed()?;
                let mut items = keyed.unkeyed("item")?;
                assert_eq!(items.count(), 2);
                assert_eq!(items.decode_next::<String>()?, "a");
                assert_eq!(items.decode_next::<String>()?, "b");
                assert!(items.is_at_end());
                let err = items.decode_next::<String>().unwrap_err();
                assert!(matches!(err, DecodeError::ValueNotFound { .. }));
                assert_eq!(err.path().to_string(), "item[2]");
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_failed_decode_can_be_retried_as_other_type() {
        let node = parse_str("<e><id>abc-1</id></e>").unwrap();
        let mut decoder = decoder();
        let id = decoder
            .with_frame(Frame::Element { node: &node, prefix: None }, None, |d| {
                let mut keyed = d.keyed()?;
                match keyed.decode::<i64>("id") {
                    Ok(n) => Ok(n.to_string()),
                    Err(DecodeError::DataCorrupted { .. }) => keyed.decode::<String>("id"),
                    Err(e) => Err(e),
                }
            })
            .unwrap();
        assert_eq!(id, "abc-1");
        assert!(decoder.stack.is_empty());
        assert!(decoder.coding_path().keys().is_empty());
    }

    #[test]
    fn test_decode_scalar_distinguishes_absent_and_malformed() {
        let node = parse_str("<e><n>x</n></e>").unwrap();
        let mut decoder = decoder();
        decoder
            .with_frame(Frame::Element { node: &node, prefix: None }, None, |d| {
                let keyed = d.keyed()?;
                assert!(matches!(
                    keyed.decode_scalar::<u8>("missing"),
                    Err(DecodeError::KeyNotFound { .. })
                ));
                assert!(matches!(
                    keyed.decode_scalar::<u8>("n"),
                    Err(DecodeError::DataCorrupted { .. })
                ));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_text_key_on_text_frame_is_type_mismatch() {
        let node = parse_str("<e>plain</e>").unwrap();
        let mut decoder = decoder();
        let err = decoder
            .with_frame(Frame::Value(node.text.as_deref()), None, |d| {
                d.keyed().map(|_| ())
            })
            .unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_scalar_with_child_elements_is_not_nil() {
        let node = parse_str("<item><title><b>Bold</b></title></item>").unwrap();
        let err = decoder().decode::<Item>(&node).unwrap_err();
        assert!(matches!(err, DecodeError::ValueNotFound { .. }));
        assert_eq!(err.path().to_string(), "title");
    }

    #[test]
    fn test_date_with_child_elements_is_value_not_found() {
        let node = parse_str("<d><span>2020</span></d>").unwrap();
        let err = decoder()
            .with_frame(
                Frame::Element { node: &node, prefix: None },
                None,
                <DateTime<FixedOffset> as XmlDecodable>::decode_optional,
            )
            .unwrap_err();
        assert!(matches!(err, DecodeError::ValueNotFound { .. }));
    }

    #[test]
    fn test_raw_node_keeps_markup() {
        let node = parse_str(r#"<e><body class="x"><p>Hi</p></body></e>"#).unwrap();
        let mut decoder = decoder();
        let body = decoder
            .with_frame(Frame::Element { node: &node, prefix: None }, None, |d| {
                d.keyed()?.decode::<Node>("body")
            })
            .unwrap();
        assert_eq!(body.attribute("class"), Some("x"));
        assert_eq!(body.children, vec![Node::leaf("p", "Hi")]);
    }

    #[test]
    fn test_date_formatter_rejection() {
        let node = parse_str("<d>not a date</d>").unwrap();
        let mut decoder = Decoder::new(DateStrategy::Formatted(DateFormat::Rfc822));
        let err = decoder.decode::<DateTime<FixedOffset>>(&node).unwrap_err();
        assert_eq!(
            err,
            DecodeError::DataCorrupted {
                message: "Unable to decode date with formatter".into(),
                path: CodingPath::default(),
            }
        );
    }

    #[test]
    fn test_deferred_date_reads_rfc3339() {
        let node = parse_str("<d>2020-01-01T00:00:00Z</d>").unwrap();
        let date = decoder().decode::<DateTime<FixedOffset>>(&node).unwrap();
        assert_eq!(date.to_rfc3339(), "2020-01-01T00:00:00+00:00");
    }
}
