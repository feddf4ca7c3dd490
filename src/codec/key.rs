use std::fmt;

/// Pseudo-key addressing an element's own character data.
pub const TEXT_KEY: &str = "@text";

/// Pseudo-key addressing an element's attributes as a record.
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// Identifies one step of a decode or encode: a field name, plus the position
/// for elements of a repeated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodingKey {
    pub name: String,
    pub index: Option<usize>,
}

impl CodingKey {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            index: None,
        }
    }

    /// Key synthesized for element `index` of a run of `name` siblings.
    pub fn indexed(name: &str, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index: Some(index),
        }
    }
}

impl fmt::Display for CodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => f.write_str(&self.name),
        }
    }
}

/// The keys leading to the value currently being decoded or encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodingPath(Vec<CodingKey>);

impl CodingPath {
    pub fn push(&mut self, key: CodingKey) {
        self.0.push(key);
    }

    pub fn pop(&mut self) -> Option<CodingKey> {
        self.0.pop()
    }

    pub fn last(&self) -> Option<&CodingKey> {
        self.0.last()
    }

    pub fn keys(&self) -> &[CodingKey] {
        &self.0
    }

    /// This path extended by `key`, leaving `self` untouched.
    pub fn with(&self, key: CodingKey) -> Self {
        let mut path = self.clone();
        path.push(key);
        path
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}
