//! Stack-based encoder from typed values to a [`Node`] tree.
//!
//! Mirror of the decoder: each nesting level pushes an in-progress node, the
//! value writes its fields into it through a container, and the finished node
//! is popped and attached to its parent.
//!
//! The one structural special case is the namespace wrapper. A value whose type
//! is [`NamespaceCodable`](super::NamespaceCodable) has no element of its own
//! in markup; its children are tagged with the wrapper's prefix and appended
//! straight to the current node.

use chrono::{DateTime, FixedOffset};

use super::key::{ATTRIBUTES_KEY, TEXT_KEY};
use super::{CodingKey, CodingPath, EncodeError, XmlEncodable, XmlScalar};
use crate::dates::DateStrategy;
use crate::xml::Node;

#[derive(Debug)]
struct Frame {
    node: Node,
    /// Prefix given to unqualified children created under this frame.
    prefix: Option<&'static str>,
}

/// Encodes values into freshly built trees.
#[derive(Debug)]
pub struct Encoder {
    stack: Vec<Frame>,
    path: CodingPath,
    date_strategy: DateStrategy,
}

impl Encoder {
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

    /// Encodes `value` as an element named `root`.
    pub fn encode<T: XmlEncodable + ?Sized>(
        &mut self,
        value: &T,
        root: &str,
    ) -> Result<Node, EncodeError> {
        self.with_frame(Node::element(root), None, None, |e| value.encode(e))
    }

    /// Like [`encode`](Self::encode), then declares every well-known namespace
    /// prefix the tree uses on its root.
    pub fn encode_document<T: XmlEncodable + ?Sized>(
        &mut self,
        value: &T,
        root: &str,
    ) -> Result<Node, EncodeError> {
        let mut node = self.encode(value, root)?;
        node.declare_namespaces();
        Ok(node)
    }

    fn with_frame(
        &mut self,
        node: Node,
        prefix: Option<&'static str>,
        key: Option<CodingKey>,
        f: impl FnOnce(&mut Self) -> Result<(), EncodeError>,
    ) -> Result<Node, EncodeError> {
        self.stack.push(Frame { node, prefix });
        let pushed_key = key.is_some();
        if let Some(key) = key {
            self.path.push(key);
        }

        let result = f(self);

        if pushed_key {
            self.path.pop();
        }
        let frame = self.stack.pop();
        result?;
        frame
            .map(|frame| frame.node)
            .ok_or_else(|| self.invalid("Encoder stack underflow"))
    }

    fn top(&mut self) -> Result<&mut Frame, EncodeError> {
        match self.stack.last_mut() {
            Some(frame) => Ok(frame),
            None => Err(EncodeError::InvalidValue {
                message: "No value is being encoded".into(),
                path: self.path.clone(),
            }),
        }
    }

    fn invalid(&self, message: impl Into<String>) -> EncodeError {
        EncodeError::InvalidValue {
            message: message.into(),
            path: self.path.clone(),
        }
    }

    /// Creates a child element for `key`, inheriting the current prefix unless
    /// the key is already qualified.
    fn child_node(&self, key: &str) -> (Node, Option<&'static str>) {
        let prefix = self.stack.last().and_then(|frame| frame.prefix);
        let mut node = Node::element(key);
        if node.namespace_prefix.is_none() {
            node.namespace_prefix = prefix.map(str::to_string);
        }
        (node, prefix)
    }

    pub fn keyed(&mut self) -> KeyedEncoder<'_> {
        KeyedEncoder { encoder: self }
    }

    pub fn single_value(&mut self) -> SingleValueEncoder<'_> {
        SingleValueEncoder { encoder: self }
    }
}

/// Writes fields of a record into the current node.
pub struct KeyedEncoder<'e> {
    encoder: &'e mut Encoder,
}

impl KeyedEncoder<'_> {
    /// Writes `value` under `key`.
    ///
    /// - [`TEXT_KEY`] sets the node's text
    /// - [`ATTRIBUTES_KEY`] turns the value's fields into attributes; absent
    ///   fields write none
    /// - a namespace wrapper is lifted into the current node
    /// - anything else becomes a child element named `key`
    pub fn encode<T: XmlEncodable + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), EncodeError> {
        if let Some(prefix) = T::NAMESPACE {
            return self.lift(key, prefix, value);
        }

        match key {
            TEXT_KEY => {
                let scratch = self.scratch(key, value)?;
                self.encoder.top()?.node.text = scratch.text;
            }
            ATTRIBUTES_KEY => {
                let scratch = self.scratch(key, value)?;
                let node = &mut self.encoder.top()?.node;
                for field in scratch.children {
                    let name = field.qualified_name();
                    node.set_attribute(name, field.text.unwrap_or_default());
                }
            }
            _ => {
                let (child, prefix) = self.encoder.child_node(key);
                let child = self.encoder.with_frame(
                    child,
                    prefix,
                    Some(CodingKey::named(key)),
                    |e| value.encode(e),
                )?;
                self.encoder.top()?.node.children.push(child);
            }
        }
        Ok(())
    }

    /// Writes `value` if present; absent values produce nothing.
    pub fn encode_if_present<T: XmlEncodable>(
        &mut self,
        key: &str,
        value: &Option<T>,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.encode(key, value),
            None => Ok(()),
        }
    }

    /// Writes one `key` element per value, in order.
    pub fn encode_vec<T: XmlEncodable>(&mut self, key: &str, values: &[T]) -> Result<(), EncodeError> {
        let mut container = self.unkeyed(key);
        for value in values {
            container.encode(value)?;
        }
        Ok(())
    }

    pub fn unkeyed(&mut self, key: &str) -> UnkeyedEncoder<'_> {
        UnkeyedEncoder {
            encoder: &mut *self.encoder,
            key: key.to_string(),
            count: 0,
        }
    }

    /// Encodes `value` into a detached node without a prefix context.
    fn scratch<T: XmlEncodable + ?Sized>(&mut self, key: &str, value: &T) -> Result<Node, EncodeError> {
        self.encoder.with_frame(
            Node::element(key),
            None,
            Some(CodingKey::named(key)),
            |e| value.encode(e),
        )
    }

    /// Inverse of namespace unwrapping: the wrapper's children join the current
    /// node, each tagged with the wrapper's prefix.
    fn lift<T: XmlEncodable + ?Sized>(
        &mut self,
        key: &str,
        prefix: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        let wrapper = self.encoder.with_frame(
            Node::element(key),
            Some(prefix),
            Some(CodingKey::named(key)),
            |e| value.encode(e),
        )?;
        let node = &mut self.encoder.top()?.node;
        for mut child in wrapper.children {
            child
                .namespace_prefix
                .get_or_insert_with(|| prefix.to_string());
            node.children.push(child);
        }
        Ok(())
    }
}

/// A raw subtree. Its text, attributes and children are copied into the
/// element being built; the element keeps the name its key gave it.
impl XmlEncodable for Node {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        let node = &mut encoder.top()?.node;
        node.text.clone_from(&self.text);
        for (name, value) in self.attributes.iter().flatten() {
            node.set_attribute(name.as_str(), value.as_str());
        }
        node.children.extend(self.children.iter().cloned());
        Ok(())
    }
}

/// Appends a run of same-named children to the current node.
pub struct UnkeyedEncoder<'e> {
    encoder: &'e mut Encoder,
    key: String,
    count: usize,
}

impl UnkeyedEncoder<'_> {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn encode<T: XmlEncodable + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let (child, prefix) = self.encoder.child_node(&self.key);
        let child = self.encoder.with_frame(
            child,
            prefix,
            Some(CodingKey::indexed(&self.key, self.count)),
            |e| value.encode(e),
        )?;
        self.encoder.top()?.node.children.push(child);
        self.count += 1;
        Ok(())
    }
}

/// Writes a scalar as the current node's text.
pub struct SingleValueEncoder<'e> {
    encoder: &'e mut Encoder,
}

impl SingleValueEncoder<'_> {
    pub fn encode<T: XmlScalar>(self, value: &T) -> Result<(), EncodeError> {
        let text = value
            .to_xml_text()
            .ok_or_else(|| self.encoder.invalid(format!("{} has no textual form", T::TYPE_NAME)))?;
        self.encoder.top()?.node.text = Some(text);
        Ok(())
    }

    pub fn encode_date(self, date: &DateTime<FixedOffset>) -> Result<(), EncodeError> {
        let text = match self.encoder.date_strategy {
            DateStrategy::DeferredToDate => date.to_rfc3339(),
            DateStrategy::Formatted(format) => format.format(date),
        };
        self.encoder.top()?.node.text = Some(text);
        Ok(())
    }
}
