//! In-memory element tree shared by the tree builder, the decoder and the encoder.

use indexmap::IndexMap;

use super::namespace;

/// A single element of a parsed or encoded document.
///
/// Qualified names are split on construction: `dc:creator` becomes
/// `name == "creator"` with `namespace_prefix == Some("dc")`. Mixed content is
/// not modeled; all character data of an element lands in `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Local part of the element name.
    pub name: String,
    /// Trimmed character data, `None` when the element had none.
    pub text: Option<String>,
    /// Attributes in document order, `None` when the element had none.
    pub attributes: Option<IndexMap<String, String>>,
    /// Child elements in document order.
    pub children: Vec<Node>,
    /// Prefix of the element name, without the colon.
    pub namespace_prefix: Option<String>,
}

impl Node {
    /// Creates an element from a possibly prefixed name.
    pub fn element(qualified_name: &str) -> Self {
        let (prefix, local) = split_qualified(qualified_name);
        Self {
            name: local.to_string(),
            namespace_prefix: prefix.map(str::to_string),
            ..Self::default()
        }
    }

    /// Creates a leaf element holding `text`.
    pub fn leaf(qualified_name: &str, text: impl Into<String>) -> Self {
        let mut node = Self::element(qualified_name);
        node.text = Some(text.into());
        node
    }

    /// The element name as it appears in markup, prefix included.
    pub fn qualified_name(&self) -> String {
        match &self.namespace_prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Returns true if this element is named `qualified_name`.
    pub fn matches(&self, qualified_name: &str) -> bool {
        let (prefix, local) = split_qualified(qualified_name);
        self.name == local && self.namespace_prefix.as_deref() == prefix
    }

    /// First child named `qualified_name`.
    pub fn child(&self, qualified_name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.matches(qualified_name))
    }

    /// All children named `qualified_name`, in document order.
    pub fn children_named<'a>(&'a self, qualified_name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.matches(qualified_name))
    }

    /// Returns true if any direct child carries `prefix`.
    pub fn has_prefixed_child(&self, prefix: &str) -> bool {
        self.children
            .iter()
            .any(|c| c.namespace_prefix.as_deref() == Some(prefix))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value.into());
    }

    /// Appends `text` to the existing character data.
    pub fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// No text and no children. Attributes are not considered.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }

    /// Adds `xmlns:<prefix>` declarations for every well-known prefix used in the
    /// tree that the root does not already declare.
    pub fn declare_namespaces(&mut self) {
        let mut used = Vec::new();
        collect_prefixes(self, &mut used);
        for prefix in used {
            let key = format!("xmlns:{prefix}");
            if self.attribute(&key).is_some() {
                continue;
            }
            if let Some(uri) = namespace::uri_for(&prefix) {
                self.set_attribute(key, uri);
            }
        }
    }
}

fn collect_prefixes(node: &Node, used: &mut Vec<String>) {
    if let Some(prefix) = &node.namespace_prefix {
        if !used.contains(prefix) {
            used.push(prefix.clone());
        }
    }
    if let Some(attrs) = &node.attributes {
        for key in attrs.keys() {
            if let (Some(prefix), _) = split_qualified(key) {
                if prefix != "xmlns" && prefix != "xml" && !used.iter().any(|p| p == prefix) {
                    used.push(prefix.to_string());
                }
            }
        }
    }
    for child in &node.children {
        collect_prefixes(child, used);
    }
}

/// Splits `prefix:local` into its parts. Names without a colon have no prefix.
pub fn split_qualified(qualified_name: &str) -> (Option<&str>, &str) {
    match qualified_name.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => (Some(prefix), local),
        _ => (None, qualified_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_splits_prefix() {
        let node = Node::element("dc:creator");
        assert_eq!(node.name, "creator");
        assert_eq!(node.namespace_prefix.as_deref(), Some("dc"));
        assert_eq!(node.qualified_name(), "dc:creator");
    }

    #[test]
    fn test_matches_requires_same_prefix() {
        let node = Node::element("atom:link");
        assert!(node.matches("atom:link"));
        assert!(!node.matches("link"));
        assert!(Node::element("link").matches("link"));
    }

    #[test]
    fn test_children_named_preserves_order() {
        let mut parent = Node::element("channel");
        parent.children.push(Node::leaf("item", "a"));
        parent.children.push(Node::leaf("title", "t"));
        parent.children.push(Node::leaf("item", "b"));

        let texts: Vec<_> = parent
            .children_named("item")
            .filter_map(|n| n.text.as_deref())
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_append_text_concatenates() {
        let mut node = Node::element("title");
        node.append_text("Hello");
        node.append_text(" World");
        assert_eq!(node.text.as_deref(), Some("Hello World"));
    }

    #[test]
    fn test_declare_namespaces_adds_known_prefixes_once() {
        let mut root = Node::element("rss");
        let mut item = Node::element("item");
        item.children.push(Node::leaf("dc:creator", "Jane"));
        item.children.push(Node::leaf("dc:date", "2020-01-01"));
        root.children.push(item);

        root.declare_namespaces();
        assert_eq!(
            root.attribute("xmlns:dc"),
            Some("http://purl.org/dc/elements/1.1/")
        );
        assert_eq!(root.attributes.as_ref().map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_declare_namespaces_keeps_existing_declaration() {
        let mut root = Node::element("rss");
        root.set_attribute("xmlns:dc", "urn:custom");
        root.children.push(Node::leaf("dc:creator", "Jane"));

        root.declare_namespaces();
        assert_eq!(root.attribute("xmlns:dc"), Some("urn:custom"));
    }
}
