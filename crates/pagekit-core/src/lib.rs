//! pagekit Core Library
//!
//! Doctype table, page configuration and error handling shared by the
//! pagekit renderer and CLI.

pub mod config;
pub mod doctype;
pub mod error;

pub use config::{CssConfig, PageConfig};
pub use doctype::Doctype;
pub use error::{CoreError, Result};
