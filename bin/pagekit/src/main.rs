//! pagekit CLI
//!
//! Renders HTML pages from TOML page descriptions.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for pagekit.
#[derive(Parser)]
#[command(name = "pagekit", version, about = "Compose HTML pages from metadata")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Render a page description to HTML
    Render {
        /// Path to the page description
        page: std::path::PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Let PAGEKIT__* environment variables override page values
        #[arg(long)]
        env: bool,
    },
    /// Validate a page description and its templates
    Check {
        /// Path to the page description
        page: std::path::PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// List the known doctype keys
    Doctypes,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    pagekit::init_tracing(cli.verbose);

    match cli.command {
        Commands::Render { page, output, env } => {
            pagekit::cmd::render::run(&page, output.as_deref(), env)?;
        }
        Commands::Check { page, strict } => {
            pagekit::cmd::check::run(&page, strict)?;
        }
        Commands::Doctypes => pagekit::cmd::doctypes::run(),
    }

    Ok(())
}
