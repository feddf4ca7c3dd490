//! Renders a [`Node`] tree back to markup.

use std::borrow::Cow;

use super::Node;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Output layout for [`to_xml_string`] and [`to_document_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// One element per line, children indented one level deeper.
    pub formatted: bool,
    /// Spaces per indentation level when `formatted`.
    pub indent_width: usize,
    /// End a formatted document with a newline.
    pub trailing_newline: bool,
}

impl WriteOptions {
    pub const fn compact() -> Self {
        Self {
            formatted: false,
            indent_width: 4,
            trailing_newline: false,
        }
    }

    pub const fn pretty() -> Self {
        Self {
            formatted: true,
            indent_width: 4,
            trailing_newline: true,
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::compact()
    }
}

/// Renders `node` without an XML declaration.
pub fn to_xml_string(node: &Node, options: &WriteOptions) -> String {
    let mut out = String::new();
    write_node(&mut out, node, options, 0);
    out
}

/// Renders `node` as a complete document, XML declaration included.
pub fn to_document_string(node: &Node, options: &WriteOptions) -> String {
    let mut out = String::from(DECLARATION);
    if options.formatted {
        out.push('\n');
    }
    write_node(&mut out, node, options, 0);
    if options.formatted && options.trailing_newline {
        out.push('\n');
    }
    out
}

/// Appends `node` to `out` at `level` levels of indentation.
///
/// Elements with children close on their own line, elements with only text are
/// written inline, and elements with neither are self-closing. Attributes are
/// sorted by name so output is deterministic.
pub fn write_node(out: &mut String, node: &Node, options: &WriteOptions, level: usize) {
    if options.formatted {
        push_indent(out, options, level);
    }

    let name = node.qualified_name();
    out.push('<');
    out.push_str(&name);

    if let Some(attributes) = &node.attributes {
        let mut sorted: Vec<_> = attributes.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in sorted {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
    }

    if !node.children.is_empty() {
        out.push('>');
        // Mixed content is not modeled; keep any text ahead of the children.
        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        for child in &node.children {
            if options.formatted {
                out.push('\n');
            }
            write_node(out, child, options, level + 1);
        }
        if options.formatted {
            out.push('\n');
            push_indent(out, options, level);
        }
        push_close(out, &name);
    } else if let Some(text) = &node.text {
        out.push('>');
        out.push_str(&escape(text));
        push_close(out, &name);
    } else {
        out.push_str(" />");
    }
}

fn push_close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn push_indent(out: &mut String, options: &WriteOptions, level: usize) {
    for _ in 0..level.saturating_mul(options.indent_width) {
        out.push(' ');
    }
}

/// Escapes `& < > " '`. Borrows when nothing needs escaping.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
