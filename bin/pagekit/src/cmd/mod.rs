//! CLI commands.

pub mod check;
pub mod doctypes;
pub mod render;
