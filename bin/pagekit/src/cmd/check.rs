//! Check command - validate a page description and its templates

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use pagekit_core::PageConfig;
use pagekit_render::{Page, PageTemplate};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the page description, its templates, and a trial render.
pub fn run(page_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?page_path, strict, "Checking page description");

    let mut result = ValidationResult::default();

    println!("Checking page description...");
    let config = match PageConfig::load(page_path) {
        Ok(c) => {
            println!("  ✓ Page description valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Page description error: {e}"));
            println!("  ✗ Page description invalid: {e}");
            None
        }
    };

    if let Some(ref cfg) = config {
        println!("\nChecking templates...");
        check_templates(cfg, &mut result);

        println!("\nChecking page values...");
        check_values(cfg, &mut result);

        if !result.has_errors() {
            println!("\nRendering page...");
            trial_render(cfg, &mut result);
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn check_templates(config: &PageConfig, result: &mut ValidationResult) {
    let templates = [("layout", &config.layout), ("body template", &config.template)];

    for (kind, path) in templates {
        let Some(path) = path else {
            println!("  - {kind}: default");
            continue;
        };

        match PageTemplate::open(path) {
            Ok(_) => println!("  ✓ {kind}: {}", path.display()),
            Err(e) => {
                println!("  ✗ {kind}: {e}");
                result.add_error(format!("{kind}: {e}"));
            }
        }
    }
}

fn check_values(config: &PageConfig, result: &mut ValidationResult) {
    if config.title.as_deref().is_none_or(str::is_empty) {
        result.add_warning("Page has no title");
    }

    if config.canonical.is_some() && config.domain.is_none() {
        result.add_warning("canonical is set but domain is missing; no canonical link is rendered");
    }

    if config.domain.as_deref().is_some_and(|d| d.ends_with('/')) {
        result.add_warning("domain should not have a trailing slash");
    }

    if config.template.is_none() && config.text.is_none() {
        result.add_warning("Page has neither a body template nor text");
    }

    println!("  ✓ {} stylesheet(s), {} script(s)", config.css.len(), config.js.len());
}

fn trial_render(config: &PageConfig, result: &mut ValidationResult) {
    let rendered = Page::from_config(config)
        .map_err(|e| e.to_string())
        .and_then(|page| page.render().map_err(|e| e.to_string()));

    match rendered {
        Ok(html) => println!("  ✓ Rendered {} bytes", html.len()),
        Err(e) => {
            println!("  ✗ Render failed: {e}");
            result.add_error(format!("Render failed: {e}"));
        }
    }
}
