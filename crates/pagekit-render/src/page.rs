//! Page composition.
//!
//! A [`Page`] collects the metadata of one HTML document and renders it
//! through a layout template. The layout pulls fragments such as
//! `page.title` or `page.css` from a [`PageView`], which calls back into the
//! page's `render_*` methods.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use indexmap::{IndexMap, IndexSet};
use pagekit_core::{CoreError, Doctype, PageConfig, doctype};
use tracing::debug;

use crate::{
    html::{Attributes, Tag},
    page_template::PageTemplate,
    template::{Result, Scope, TemplateError},
};

/// Layout used when no layout file is configured.
pub const DEFAULT_LAYOUT: &str = include_str!("../templates/layout.html");

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A stylesheet included by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssEntry {
    pub file: String,
    /// `media` attribute; `all` when unset.
    pub media: Option<String>,
    /// Conditional comment expression, e.g. `IE gt 7`.
    pub condition: Option<String>,
}

/// An HTML document under construction.
///
/// Setters return `&mut Self` so calls can be chained:
///
/// ```
/// use pagekit_render::Page;
///
/// let mut page = Page::new();
/// page.set_title("Hello").set_text("<p>World</p>").add_css("main.css", None, None);
/// let html = page.render().unwrap();
/// assert!(html.contains("<title>Hello</title>"));
/// ```
#[derive(Debug, Clone)]
pub struct Page {
    doctype: Option<Doctype>,
    charset: String,
    css: IndexMap<String, CssEntry>,
    js: IndexSet<String>,
    body_attr: Attributes,
    domain: Option<String>,
    template: Option<PathBuf>,
    layout: Option<PathBuf>,

    title: Option<String>,
    header: Option<String>,
    keywords: Option<String>,
    description: Option<String>,
    canonical: Option<String>,
    text: Option<String>,
    meta: Option<String>,
    vars: IndexMap<String, String>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            doctype: None,
            charset: "utf-8".to_string(),
            css: IndexMap::new(),
            js: IndexSet::new(),
            body_attr: Attributes::new(),
            domain: None,
            template: None,
            layout: None,
            title: None,
            header: None,
            keywords: None,
            description: None,
            canonical: None,
            text: None,
            meta: None,
            vars: IndexMap::new(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page from a loaded page description.
    pub fn from_config(config: &PageConfig) -> pagekit_core::Result<Self> {
        Ok(Self {
            doctype: config.doctype()?,
            charset: config.charset.clone(),
            css: config
                .css
                .iter()
                .map(|c| {
                    let entry = CssEntry {
                        file: c.file.clone(),
                        media: c.media.clone(),
                        condition: c.condition.clone(),
                    };
                    (c.file.clone(), entry)
                })
                .collect(),
            js: config.js.iter().cloned().collect(),
            body_attr: config.body_attr.clone().into(),
            domain: config.domain.clone(),
            template: config.template.clone(),
            layout: config.layout.clone(),
            title: config.title.clone(),
            header: config.header.clone(),
            keywords: config.keywords.clone(),
            description: config.description.clone(),
            canonical: config.canonical.clone(),
            text: config.text.clone(),
            meta: config.meta.clone(),
            vars: config.vars.clone(),
        })
    }

    /// Declaration for a doctype key, or `None` for unknown keys.
    #[must_use]
    pub fn doctype_html(key: &str) -> Option<&'static str> {
        doctype::doctype_html(key)
    }

    /// Render the whole document through the layout template.
    pub fn render(&self) -> Result<String> {
        let layout = match &self.layout {
            Some(path) => PageTemplate::open(path)?,
            None => PageTemplate::from_source("layout.html", DEFAULT_LAYOUT)?,
        };
        debug!(
            layout = %layout.path().map_or(Cow::Borrowed("<bundled>"), |p| p.to_string_lossy()),
            "rendering page"
        );
        layout.render(&PageView::document(self))
    }

    pub fn render_doctype(&self) -> Option<String> {
        self.doctype.map(|d| format!("{}\n", d.declaration()))
    }

    pub fn render_html_tag(&self) -> String {
        if self.doctype.is_some_and(|d| d.is_xhtml()) {
            format!("<html xmlns=\"{XHTML_NAMESPACE}\">\n")
        } else {
            "<html>\n".to_string()
        }
    }

    pub fn render_charset(&self) -> String {
        let attrs = if self.doctype == Some(Doctype::Html5) {
            Attributes::from([("charset", self.charset.as_str())])
        } else {
            Attributes::from([
                ("http-equiv", "Content-Type".to_string()),
                ("content", format!("text/html; charset={}", self.charset)),
            ])
        };
        format!("{}\n", Tag::new("meta").attrs(&attrs))
    }

    pub fn render_title(&self) -> String {
        let title = self.title.as_deref().unwrap_or_default();
        format!("{}\n", Tag::new("title").content(title))
    }

    /// Visible page header in `tag`; the title is used when no header is set.
    pub fn render_header(&self, tag: &str, attr: Option<&Attributes>) -> String {
        let header = non_empty(self.header.as_deref())
            .or(self.title.as_deref())
            .unwrap_or_default();
        let mut tag = Tag::new(tag).content(header);
        if let Some(attr) = attr {
            tag = tag.attrs(attr);
        }
        format!("{tag}\n")
    }

    /// Header in a plain `<h1>`.
    pub fn render_default_header(&self) -> String {
        self.render_header("h1", None)
    }

    pub fn render_keywords(&self, default: Option<&str>) -> String {
        self.render_named_meta("keywords", self.keywords.as_deref(), default)
    }

    pub fn render_description(&self, default: Option<&str>) -> String {
        self.render_named_meta("description", self.description.as_deref(), default)
    }

    fn render_named_meta(&self, name: &str, value: Option<&str>, default: Option<&str>) -> String {
        let content = non_empty(value).or(default).unwrap_or_default();
        let attrs = Attributes::from([("name", name), ("content", content)]);
        format!("{}\n", Tag::new("meta").attrs(&attrs))
    }

    /// Stylesheet links, one per line. `None` when no stylesheets were added.
    pub fn render_css(&self) -> Option<String> {
        if self.css.is_empty() {
            return None;
        }

        let mut out = String::new();
        for entry in self.css.values() {
            let media = non_empty(entry.media.as_deref()).unwrap_or("all");
            let attrs = Attributes::from([
                ("rel", "stylesheet"),
                ("type", "text/css"),
                ("href", entry.file.as_str()),
                ("media", media),
            ]);
            let link = Tag::new("link").attrs(&attrs);
            match non_empty(entry.condition.as_deref()) {
                Some(condition) => out.push_str(&format!("<!--[if {condition}]>{link}<![endif]-->")),
                None => out.push_str(&link.to_string()),
            }
            out.push('\n');
        }
        Some(out)
    }

    /// Script tags between `<!-- JS -->` markers. `None` when no scripts
    /// were added.
    ///
    /// With `explicit_close` each script gets a `</script>` closing tag
    /// instead of self-closing.
    pub fn render_js(&self, explicit_close: bool) -> Option<String> {
        if self.js.is_empty() {
            return None;
        }

        let mut out = String::from("<!-- JS -->\n");
        for file in &self.js {
            let attrs = Attributes::from([("type", "text/javascript"), ("src", file.as_str())]);
            let mut script = Tag::new("script").attrs(&attrs);
            if explicit_close {
                script = script.explicit_close();
            }
            out.push_str(&format!("{script}\n"));
        }
        out.push_str("<!-- /JS -->\n");
        Some(out)
    }

    /// Canonical link. The domain comes from `domain` or, when `None`, from
    /// [`Page::set_domain`]; without a domain or a canonical path nothing is
    /// rendered.
    pub fn render_canonical(&self, domain: Option<&str>) -> Option<String> {
        let domain = non_empty(domain.or(self.domain.as_deref()))?;
        let href = self.canonical(Some(domain))?;
        let attrs = Attributes::from([("rel", "canonical"), ("href", href.as_str())]);
        Some(format!("{}\n", Tag::new("link").attrs(&attrs)))
    }

    /// The `<body>` element.
    ///
    /// Inner markup comes from the body template when one is set, otherwise
    /// from the header followed by the page text. `attr` replaces the stored
    /// body attributes; scripts are appended when `with_js` is true.
    pub fn render_body(&self, attr: Option<&Attributes>, with_js: bool) -> Result<String> {
        let inner = match &self.template {
            Some(path) => {
                debug!(template = %path.display(), "rendering body template");
                PageTemplate::open(path)?.render(&PageView::body(self))?
            }
            None => format!(
                "{}{}",
                self.render_default_header(),
                self.text.as_deref().unwrap_or_default()
            ),
        };

        let js = if with_js {
            self.render_js(false).unwrap_or_default()
        } else {
            String::new()
        };
        let content = format!("{inner}\n{js}");
        let attrs = attr.filter(|a| !a.is_empty()).unwrap_or(&self.body_attr);

        Ok(format!(
            "{}\n",
            Tag::new("body").content(&content).attrs(attrs).block()
        ))
    }

    pub fn add_css(
        &mut self,
        file: impl Into<String>,
        media: Option<&str>,
        condition: Option<&str>,
    ) -> &mut Self {
        let file = file.into();
        let entry = CssEntry {
            file: file.clone(),
            media: media.map(str::to_owned),
            condition: condition.map(str::to_owned),
        };
        self.css.insert(file, entry);
        self
    }

    pub fn add_js(&mut self, file: impl Into<String>) -> &mut Self {
        self.js.insert(file.into());
        self
    }

    pub fn clear_css(&mut self) -> &mut Self {
        self.css.clear();
        self
    }

    pub fn clear_js(&mut self) -> &mut Self {
        self.js.clear();
        self
    }

    /// Stylesheets in render order.
    pub fn css(&self) -> impl Iterator<Item = &CssEntry> {
        self.css.values()
    }

    /// Scripts in render order.
    pub fn js(&self) -> impl Iterator<Item = &str> {
        self.js.iter().map(String::as_str)
    }

    /// Set a template variable. Known keys (`title`, `header`, `keywords`,
    /// `description`, `canonical`, `text`, `meta`) write the matching field.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = Some(value.into());
        match key {
            "title" => self.title = value,
            "header" => self.header = value,
            "keywords" => self.keywords = value,
            "description" => self.description = value,
            "canonical" => self.canonical = value,
            "text" => self.text = value,
            "meta" => self.meta = value,
            _ => {
                self.vars.insert(key.to_string(), value.unwrap_or_default());
            }
        }
        self
    }

    /// Get a template variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "title" => self.title.as_deref(),
            "header" => self.header.as_deref(),
            "keywords" => self.keywords.as_deref(),
            "description" => self.description.as_deref(),
            "canonical" => self.canonical.as_deref(),
            "text" => self.text.as_deref(),
            "meta" => self.meta.as_deref(),
            _ => self.vars.get(key).map(String::as_str),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) -> &mut Self {
        self.keywords = Some(keywords.into());
        self
    }

    #[must_use]
    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Canonical path of the page, e.g. `/about.html`.
    pub fn set_canonical(&mut self, path: impl Into<String>) -> &mut Self {
        self.canonical = Some(path.into());
        self
    }

    /// Canonical address. With a domain, trailing slashes of the domain are
    /// dropped before the path is appended.
    #[must_use]
    pub fn canonical(&self, domain: Option<&str>) -> Option<String> {
        let path = non_empty(self.canonical.as_deref())?;
        Some(match domain {
            Some(domain) => format!("{}{path}", domain.trim_end_matches('/')),
            None => path.to_string(),
        })
    }

    /// Base URL for links, including the scheme.
    pub fn set_domain(&mut self, domain: impl Into<String>) -> &mut Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset = charset.into();
        self
    }

    #[must_use]
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Body text used when no body template is set.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Raw markup placed at the end of `<head>`.
    pub fn set_meta(&mut self, meta: impl Into<String>) -> &mut Self {
        self.meta = Some(meta.into());
        self
    }

    #[must_use]
    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    pub fn set_template(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.template = Some(path.into());
        self
    }

    #[must_use]
    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    pub fn set_body_attr(&mut self, attr: impl Into<Attributes>) -> &mut Self {
        self.body_attr = attr.into();
        self
    }

    #[must_use]
    pub fn body_attr(&self) -> &Attributes {
        &self.body_attr
    }

    pub fn set_layout(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.layout = Some(path.into());
        self
    }

    /// Layout file, `None` while the bundled [`DEFAULT_LAYOUT`] is in use.
    #[must_use]
    pub fn layout(&self) -> Option<&Path> {
        self.layout.as_deref()
    }

    /// Set the doctype by key (`html5`, `xhtml_strict`, ...).
    ///
    /// Unknown keys are rejected with [`CoreError::Doctype`].
    pub fn set_doctype(&mut self, key: &str) -> pagekit_core::Result<&mut Self> {
        let doctype = Doctype::from_key(key).ok_or_else(|| CoreError::doctype(key))?;
        Ok(self.set_doctype_kind(doctype))
    }

    pub fn set_doctype_kind(&mut self, doctype: Doctype) -> &mut Self {
        self.doctype = Some(doctype);
        self
    }

    #[must_use]
    pub fn doctype(&self) -> Option<Doctype> {
        self.doctype
    }
}

/// Renders the whole document, the same as [`Page::render`].
impl TryFrom<&Page> for String {
    type Error = TemplateError;

    fn try_from(page: &Page) -> Result<Self> {
        page.render()
    }
}

/// Read-only view of a page handed to templates.
///
/// `page.<fragment>` keys render a fragment of the page (`page.title`,
/// `page.css`, `page.body`, ...); other keys read page variables. Body
/// templates get a view without `page.body`.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    page: &'a Page,
    in_body: bool,
}

impl<'a> PageView<'a> {
    /// View used by layouts.
    #[must_use]
    pub fn document(page: &'a Page) -> Self {
        Self {
            page,
            in_body: false,
        }
    }

    /// View used by body templates.
    #[must_use]
    pub fn body(page: &'a Page) -> Self {
        Self {
            page,
            in_body: true,
        }
    }

    fn fragment(&self, name: &str) -> Result<Option<String>> {
        let page = self.page;
        Ok(match name {
            "doctype" => page.render_doctype(),
            "html_tag" => Some(page.render_html_tag()),
            "charset" => Some(page.render_charset()),
            "title" => Some(page.render_title()),
            "header" => Some(page.render_default_header()),
            "keywords" => Some(page.render_keywords(None)),
            "description" => Some(page.render_description(None)),
            "css" => page.render_css(),
            "js" => page.render_js(false),
            "canonical" => page.render_canonical(None),
            "meta" => page.meta().map(str::to_owned),
            "text" => page.text().map(str::to_owned),
            "body" if !self.in_body => Some(page.render_body(None, true)?),
            _ => None,
        })
    }
}

impl Scope for PageView<'_> {
    fn lookup(&self, key: &str) -> Result<Option<Cow<'_, str>>> {
        match key.strip_prefix("page.") {
            Some(name) => Ok(self.fragment(name)?.map(Cow::Owned)),
            None => Ok(self.page.get(key).map(Cow::Borrowed)),
        }
    }
}
