//! HTML tag serialization.
//!
//! Renders single tags with alphabetically sorted attributes so output is
//! deterministic regardless of insertion order.

use std::{collections::BTreeMap, fmt};

/// Tag attributes, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    inner: BTreeMap<String, String>,
}

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into(), value.into());
    }

    /// Builder form of [`Attributes::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A bare string is taken as a class name.
impl From<&str> for Attributes {
    fn from(class: &str) -> Self {
        Self::new().with("class", class)
    }
}

impl From<String> for Attributes {
    fn from(class: String) -> Self {
        Self::new().with("class", class)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for Attributes {
    fn from(inner: BTreeMap<String, String>) -> Self {
        Self { inner }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write!(f, " {name}=\"{}\"", escape_attr(value))?;
        }
        Ok(())
    }
}

/// Escape a value for use inside a double-quoted attribute.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// A single HTML element.
///
/// Without content the tag self-closes (`<link ... />`) unless
/// [`Tag::explicit_close`] is set. Content is inserted verbatim.
#[derive(Debug, Clone)]
pub struct Tag<'a> {
    name: &'a str,
    content: Option<&'a str>,
    attrs: Option<&'a Attributes>,
    explicit_close: bool,
    block: bool,
}

impl<'a> Tag<'a> {
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            content: None,
            attrs: None,
            explicit_close: false,
            block: false,
        }
    }

    /// Inner markup.
    #[must_use]
    pub fn content(mut self, content: &'a str) -> Self {
        self.content = Some(content);
        self
    }

    #[must_use]
    pub fn attrs(mut self, attrs: &'a Attributes) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Render `<name></name>` instead of `<name />` when there is no content.
    #[must_use]
    pub fn explicit_close(mut self) -> Self {
        self.explicit_close = true;
        self
    }

    /// Put a line break after the opening tag.
    #[must_use]
    pub fn block(mut self) -> Self {
        self.block = true;
        self
    }

    /// Render the tag to a string.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        if let Some(attrs) = self.attrs {
            write!(f, "{attrs}")?;
        }

        match self.content {
            None if !self.explicit_close => f.write_str(" />"),
            content => {
                f.write_str(">")?;
                if self.block {
                    f.write_str("\n")?;
                }
                f.write_str(content.unwrap_or_default())?;
                write!(f, "</{}>", self.name)
            }
        }
    }
}
