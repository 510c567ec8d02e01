//! wikidex CLI - Directory index pages for static wikis.
//!
//! Provides commands for:
//! - `build`: Generate one index page per directory of a built site
//! - `breadcrumb`: Print the breadcrumb trail for a path

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BreadcrumbArgs, BuildArgs};
use output::Output;

/// wikidex - Directory index pages for static wikis.
#[derive(Parser)]
#[command(name = "wikidex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate directory index pages.
    Build(BuildArgs),
    /// Print the breadcrumb trail for a path.
    Breadcrumb(BreadcrumbArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for build command
    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Breadcrumb(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
