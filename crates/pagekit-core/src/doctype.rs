//! Known document types and their declarations.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the document types a page may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Doctype {
    #[serde(rename = "html5")]
    Html5,
    #[serde(rename = "html4strict")]
    Html4Strict,
    #[serde(rename = "html4transitional")]
    Html4Transitional,
    #[serde(rename = "xhtml_strict")]
    XhtmlStrict,
    #[serde(rename = "xhtml_transitional")]
    XhtmlTransitional,
}

impl Doctype {
    /// Every known doctype, in declaration order.
    pub const ALL: [Doctype; 5] = [
        Self::Html5,
        Self::Html4Strict,
        Self::Html4Transitional,
        Self::XhtmlStrict,
        Self::XhtmlTransitional,
    ];

    /// Configuration key for this doctype.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Html5 => "html5",
            Self::Html4Strict => "html4strict",
            Self::Html4Transitional => "html4transitional",
            Self::XhtmlStrict => "xhtml_strict",
            Self::XhtmlTransitional => "xhtml_transitional",
        }
    }

    /// Literal `<!DOCTYPE ...>` declaration.
    pub fn declaration(&self) -> &'static str {
        match self {
            Self::Html5 => "<!DOCTYPE html>",
            Self::Html4Strict => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#
            }
            Self::Html4Transitional => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
            }
            Self::XhtmlStrict => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#
            }
            Self::XhtmlTransitional => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#
            }
        }
    }

    /// Whether the document is XHTML and needs the `xmlns` attribute.
    pub fn is_xhtml(&self) -> bool {
        matches!(self, Self::XhtmlStrict | Self::XhtmlTransitional)
    }

    /// Look up a doctype by its configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl FromStr for Doctype {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| CoreError::doctype(s))
    }
}

impl fmt::Display for Doctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Declaration for a doctype key, or `None` for unknown keys.
pub fn doctype_html(key: &str) -> Option<&'static str> {
    Doctype::from_key(key).map(|d| d.declaration())
}
