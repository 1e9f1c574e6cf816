//! Page configuration loaded from TOML files.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    doctype::Doctype,
    error::{CoreError, Result},
};

/// Declarative description of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Doctype key (`html5`, `html4strict`, `xhtml_strict`, ...).
    #[serde(default)]
    pub doctype: Option<String>,

    /// Document charset.
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Base URL used to qualify the canonical link (e.g., "https://example.com").
    #[serde(default)]
    pub domain: Option<String>,

    /// Layout template path. The bundled layout is used when unset.
    #[serde(default)]
    pub layout: Option<PathBuf>,

    /// Body template path.
    #[serde(default)]
    pub template: Option<PathBuf>,

    #[serde(default)]
    pub title: Option<String>,

    /// Visible page header. Falls back to the title when unset.
    #[serde(default)]
    pub header: Option<String>,

    #[serde(default)]
    pub keywords: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Canonical path, joined with the domain (e.g., "/about.html").
    #[serde(default)]
    pub canonical: Option<String>,

    /// Raw body text used when no body template is set.
    #[serde(default)]
    pub text: Option<String>,

    /// Raw markup appended to `<head>`.
    #[serde(default)]
    pub meta: Option<String>,

    /// Attributes of the `<body>` tag.
    #[serde(default)]
    pub body_attr: BTreeMap<String, String>,

    /// Stylesheets in include order.
    #[serde(default)]
    pub css: Vec<CssConfig>,

    /// Scripts in include order.
    #[serde(default)]
    pub js: Vec<String>,

    /// Extra variables exposed to templates.
    #[serde(default)]
    pub vars: IndexMap<String, String>,
}

/// A stylesheet entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssConfig {
    pub file: String,

    /// `media` attribute, `all` when unset.
    #[serde(default)]
    pub media: Option<String>,

    /// Conditional comment expression, e.g. "IE gt 7".
    #[serde(default)]
    pub condition: Option<String>,
}

fn default_charset() -> String {
    "utf-8".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            doctype: None,
            charset: default_charset(),
            domain: None,
            layout: None,
            template: None,
            title: None,
            header: None,
            keywords: None,
            description: None,
            canonical: None,
            text: None,
            meta: None,
            body_attr: BTreeMap::new(),
            css: Vec::new(),
            js: Vec::new(),
            vars: IndexMap::new(),
        }
    }
}

impl PageConfig {
    /// Load a page description from a TOML file.
    ///
    /// Relative `layout` and `template` paths are resolved against the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Page file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: PageConfig = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse page file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        config.resolve_paths(path.parent().unwrap_or(Path::new("")));
        Ok(config)
    }

    /// Load a page description, letting `PAGEKIT__*` environment variables
    /// override file values.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::new(&path.to_string_lossy(), config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("PAGEKIT").separator("__"))
            .build()?;

        let mut config: PageConfig = settings.try_deserialize()?;
        config.validate()?;
        config.resolve_paths(path.parent().unwrap_or(Path::new("")));
        Ok(config)
    }

    /// Parse the configured doctype, if any.
    pub fn doctype(&self) -> Result<Option<Doctype>> {
        self.doctype.as_deref().map(str::parse).transpose()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.doctype()?;

        if self.charset.is_empty() {
            return Err(CoreError::config("charset cannot be empty"));
        }

        if self.css.iter().any(|c| c.file.is_empty()) {
            return Err(CoreError::config("css.file cannot be empty"));
        }

        if self.js.iter().any(String::is_empty) {
            return Err(CoreError::config("js entries cannot be empty"));
        }

        if self.domain.as_deref().is_some_and(|d| d.ends_with('/')) {
            tracing::warn!("domain should not have a trailing slash");
        }

        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.layout, &mut self.template].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_page() -> String {
        r#"
doctype = "html5"
charset = "windows-1251"
domain = "https://example.com"
template = "body.html"
title = "Hello"
canonical = "/hello.html"
js = ["app.js", "stats.js"]

[body_attr]
class = "home"

[[css]]
file = "main.css"

[[css]]
file = "ie.css"
condition = "IE gt 7"

[vars]
hello = "<b>World</b>"
"#
        .to_string()
    }

    #[test]
    fn test_load_page() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let page_path = dir.path().join("page.toml");
        let mut file = std::fs::File::create(&page_path).expect("create file");
        file.write_all(create_test_page().as_bytes()).expect("write");

        let config = PageConfig::load(&page_path).expect("load page");

        assert_eq!(config.doctype().unwrap(), Some(Doctype::Html5));
        assert_eq!(config.charset, "windows-1251");
        assert_eq!(config.domain.as_deref(), Some("https://example.com"));
        assert_eq!(config.template, Some(dir.path().join("body.html")));
        assert_eq!(config.title.as_deref(), Some("Hello"));
        assert_eq!(config.js, vec!["app.js", "stats.js"]);
        assert_eq!(config.body_attr.get("class").map(String::as_str), Some("home"));
        assert_eq!(config.css.len(), 2);
        assert_eq!(config.css[1].condition.as_deref(), Some("IE gt 7"));
        assert_eq!(config.vars.get("hello").map(String::as_str), Some("<b>World</b>"));
    }

    #[test]
    fn test_page_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let page_path = dir.path().join("page.toml");
        std::fs::write(&page_path, "title = \"Minimal\"\n").expect("write");

        let config = PageConfig::load(&page_path).expect("load page");

        assert_eq!(config.charset, "utf-8");
        assert!(config.doctype.is_none());
        assert!(config.layout.is_none());
        assert!(config.css.is_empty());
        assert!(config.js.is_empty());
    }

    #[test]
    fn test_absolute_template_path_kept() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let page_path = dir.path().join("page.toml");
        let body = dir.path().join("nested").join("body.html");
        std::fs::write(
            &page_path,
            format!("template = {:?}\n", body.to_string_lossy()),
        )
        .expect("write");

        let config = PageConfig::load(&page_path).expect("load page");
        assert_eq!(config.template, Some(body));
    }

    #[test]
    fn test_invalid_doctype_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let page_path = dir.path().join("page.toml");
        std::fs::write(&page_path, "doctype = \"html6\"\n").expect("write");

        let result = PageConfig::load(&page_path);
        assert!(matches!(result, Err(CoreError::Doctype(v)) if v == "html6"));
    }

    #[test]
    fn test_empty_css_file_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let page_path = dir.path().join("page.toml");
        std::fs::write(&page_path, "[[css]]\nfile = \"\"\n").expect("write");

        let result = PageConfig::load(&page_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("css.file cannot be empty")
        );
    }

    #[test]
    fn test_load_with_env() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let page_path = dir.path().join("page.toml");
        std::fs::write(&page_path, create_test_page()).expect("write");

        // SAFETY: this is the only test that calls load_with_env or touches
        // PAGEKIT__* variables.
        unsafe { std::env::set_var("PAGEKIT__TITLE", "From env") };
        let overridden = PageConfig::load_with_env(&page_path);
        unsafe { std::env::remove_var("PAGEKIT__TITLE") };

        let config = overridden.expect("load page");
        assert_eq!(config.title.as_deref(), Some("From env"));
        assert_eq!(config.charset, "windows-1251");
        assert_eq!(config.template, Some(dir.path().join("body.html")));

        // The page file is TOML whatever its extension.
        let other_path = dir.path().join("about.page");
        std::fs::write(&other_path, "title = \"About\"\n").expect("write");

        let config = PageConfig::load_with_env(&other_path).expect("load page");
        assert_eq!(config.title.as_deref(), Some("About"));
        assert_eq!(config, PageConfig::load(&other_path).expect("load page"));
    }

    #[test]
    fn test_page_not_found() {
        let result = PageConfig::load(Path::new("/nonexistent/page.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
