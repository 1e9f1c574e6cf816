//! Templates for pages, addressed by explicit file path.
//!
//! Layout and body templates are handed over as already-resolved paths, so no
//! search-path lookup takes place: the path has to name an existing file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::template::{Result, Scope, Template, TemplateError};

/// A page layout or body template.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    path: Option<PathBuf>,
    template: Template,
}

impl PageTemplate {
    /// Load and compile the template at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TemplateError::NotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "loading page template");
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            template: Template::parse(path.display().to_string(), &source)?,
            path: Some(path.to_path_buf()),
        })
    }

    /// Compile a template shipped inside the binary.
    pub fn from_source(name: &str, source: &str) -> Result<Self> {
        Ok(Self {
            path: None,
            template: Template::parse(name, source)?,
        })
    }

    /// File the template was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn render<S: Scope + ?Sized>(&self, scope: &S) -> Result<String> {
        self.template.render(scope)
    }
}
