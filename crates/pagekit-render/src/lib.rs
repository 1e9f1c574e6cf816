//! pagekit Render Library
//!
//! Composes HTML documents from page metadata.
//!
//! # Modules
//!
//! - [`html`] - Tag serialization with sorted attributes
//! - [`template`] - Template system with variable interpolation
//! - [`page_template`] - Layout and body templates loaded by path
//! - [`page`] - The page composer

pub mod html;
pub mod page;
pub mod page_template;
pub mod template;

pub use html::{Attributes, Tag};
pub use page::{CssEntry, DEFAULT_LAYOUT, Page, PageView};
pub use page_template::PageTemplate;
pub use template::{Scope, Template, TemplateError};

pub use pagekit_core::{CoreError, Doctype, PageConfig};
