//! Template system for page layouts and bodies.
//!
//! A small interpolation language compiled once into a node list:
//!
//! - `{{ name }}` inserts a required value, `{{ name? }}` an optional one;
//! - `{% if name %} ... {% else %} ... {% endif %}` tests that a value is
//!   present and non-empty;
//! - a tag closed with `-}}` or `-%}` swallows the line break after it.
//!
//! Values come from a [`Scope`]. Templates never execute code.

use std::{borrow::Cow, path::PathBuf};

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template file not found.
    #[error("template not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Invalid template syntax.
    #[error("invalid template syntax in {name}: {message}")]
    InvalidSyntax { name: String, message: String },

    /// Template file could not be read.
    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Source of values for template placeholders.
pub trait Scope {
    /// Resolve `key`. `Ok(None)` means the key is unset.
    fn lookup(&self, key: &str) -> Result<Option<Cow<'_, str>>>;
}

impl<S: Scope + ?Sized> Scope for &S {
    fn lookup(&self, key: &str) -> Result<Option<Cow<'_, str>>> {
        (**self).lookup(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Var {
        key: String,
        optional: bool,
    },
    If {
        key: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// A compiled template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Compile `source` into a template called `name`.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self> {
        let name = name.into();
        let nodes = Parser::new(&name, source).parse()?;
        Ok(Self { name, nodes })
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template against `scope`.
    pub fn render<S: Scope + ?Sized>(&self, scope: &S) -> Result<String> {
        let mut out = String::new();
        render_nodes(&self.nodes, scope, &mut out)?;
        Ok(out)
    }
}

fn render_nodes<S: Scope + ?Sized>(nodes: &[Node], scope: &S, out: &mut String) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { key, optional } => match scope.lookup(key)? {
                Some(value) => out.push_str(&value),
                None if *optional => {}
                None => return Err(TemplateError::MissingVariable(key.clone())),
            },
            Node::If {
                key,
                then,
                otherwise,
            } => {
                let truthy = scope.lookup(key)?.is_some_and(|v| !v.is_empty());
                render_nodes(if truthy { then } else { otherwise }, scope, out)?;
            }
        }
    }
    Ok(())
}

/// How a nested block ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Else,
    Endif,
}

struct Parser<'a> {
    name: &'a str,
    src: &'a str,
    pos: usize,
    trim_next: bool,
}

impl<'a> Parser<'a> {
    fn new(name: &'a str, src: &'a str) -> Self {
        Self {
            name,
            src,
            pos: 0,
            trim_next: false,
        }
    }

    fn parse(mut self) -> Result<Vec<Node>> {
        match self.parse_nodes()? {
            (nodes, None) => Ok(nodes),
            (_, Some(Terminator::Else)) => Err(self.syntax("{% else %} outside of {% if %}")),
            (_, Some(Terminator::Endif)) => Err(self.syntax("{% endif %} without {% if %}")),
        }
    }

    fn syntax(&self, message: impl Into<String>) -> TemplateError {
        TemplateError::InvalidSyntax {
            name: self.name.to_string(),
            message: message.into(),
        }
    }

    fn push_text(&mut self, nodes: &mut Vec<Node>, mut text: &str) {
        if std::mem::take(&mut self.trim_next) {
            text = text
                .strip_prefix("\r\n")
                .or_else(|| text.strip_prefix('\n'))
                .unwrap_or(text);
        }
        if !text.is_empty() {
            nodes.push(Node::Text(text.to_string()));
        }
    }

    fn parse_nodes(&mut self) -> Result<(Vec<Node>, Option<Terminator>)> {
        let src = self.src;
        let mut nodes = Vec::new();

        loop {
            let rest = &src[self.pos..];
            let next = match (rest.find("{{"), rest.find("{%")) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };

            let Some(offset) = next else {
                self.push_text(&mut nodes, rest);
                self.pos = src.len();
                return Ok((nodes, None));
            };

            self.push_text(&mut nodes, &rest[..offset]);

            let start = self.pos + offset;
            let is_var = src[start..].starts_with("{{");
            let (open, close) = if is_var { ("{{", "}}") } else { ("{%", "%}") };
            let len = src[start + 2..]
                .find(close)
                .ok_or_else(|| self.syntax(format!("unclosed {open} delimiter")))?;
            let inner = src[start + 2..start + 2 + len].trim();
            self.pos = start + 2 + len + 2;

            let inner = match inner.strip_suffix('-') {
                Some(stripped) => {
                    self.trim_next = true;
                    stripped.trim_end()
                }
                None => inner,
            };

            if is_var {
                nodes.push(self.parse_var(inner)?);
                continue;
            }

            let mut words = inner.split_whitespace();
            match (words.next(), words.next(), words.next()) {
                (Some("if"), Some(key), None) => {
                    let key = self.parse_key(key)?.to_string();
                    let (then, end) = self.parse_nodes()?;
                    let otherwise = match end {
                        Some(Terminator::Endif) => Vec::new(),
                        Some(Terminator::Else) => match self.parse_nodes()? {
                            (otherwise, Some(Terminator::Endif)) => otherwise,
                            (_, Some(Terminator::Else)) => {
                                return Err(self.syntax("duplicate {% else %}"));
                            }
                            (_, None) => return Err(self.syntax(format!("unclosed {{% if {key} %}}"))),
                        },
                        None => return Err(self.syntax(format!("unclosed {{% if {key} %}}"))),
                    };
                    nodes.push(Node::If {
                        key,
                        then,
                        otherwise,
                    });
                }
                (Some("else"), None, None) => return Ok((nodes, Some(Terminator::Else))),
                (Some("endif"), None, None) => return Ok((nodes, Some(Terminator::Endif))),
                _ => return Err(self.syntax(format!("unknown directive: {inner}"))),
            }
        }
    }

    fn parse_var(&self, inner: &str) -> Result<Node> {
        let (key, optional) = match inner.strip_suffix('?') {
            Some(stripped) => (stripped.trim_end(), true),
            None => (inner, false),
        };
        Ok(Node::Var {
            key: self.parse_key(key)?.to_string(),
            optional,
        })
    }

    fn parse_key<'k>(&self, key: &'k str) -> Result<&'k str> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if valid {
            Ok(key)
        } else {
            Err(self.syntax(format!("invalid variable name: {key:?}")))
        }
    }
}
