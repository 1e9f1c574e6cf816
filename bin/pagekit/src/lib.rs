//! pagekit CLI Library
//!
//! Command implementations for the `pagekit` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (render, check, doctypes)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use pagekit::cmd;
//!
//! // Render a page description to a file
//! cmd::render::run(Path::new("page.toml"), Some(Path::new("index.html")), false).unwrap();
//! ```

pub mod cmd;

pub use pagekit_core::PageConfig;
pub use pagekit_render::Page;

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
