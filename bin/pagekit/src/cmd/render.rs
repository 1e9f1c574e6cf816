//! Render command - turns a page description into an HTML document

use std::{io::Write, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use pagekit_core::PageConfig;
use pagekit_render::Page;

/// Load a page description and build the page from it.
///
/// With `env`, `PAGEKIT__*` environment variables override file values.
pub fn load_page(page_path: &Path, env: bool) -> Result<Page> {
    let config = if env {
        PageConfig::load_with_env(page_path)
    } else {
        PageConfig::load(page_path)
    }
    .wrap_err_with(|| format!("Failed to load page file {}", page_path.display()))?;

    tracing::debug!(?config, "Loaded page description");

    Ok(Page::from_config(&config)?)
}

/// Run the render command.
///
/// Writes the document to `output`, or to stdout when no output is given.
pub fn run(page_path: &Path, output: Option<&Path>, env: bool) -> Result<()> {
    tracing::info!(?page_path, ?output, env, "Rendering page");

    let page = load_page(page_path, env)?;
    let html = page.render().wrap_err("Failed to render page")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &html)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(bytes = html.len(), output = %path.display(), "Page written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
