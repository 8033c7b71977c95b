//! mark CLI - dual-format blog entry renderer.
//!
//! Provides commands for:
//! - `render`: Render entries into their canonical and AMP pages
//! - `check`: Render entries without writing anything
//! - `archive`: Write the site index listing every entry
//! - `build`: Rebuild every entry and the site index

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ArchiveArgs, BuildArgs, CheckArgs, RenderArgs};
use output::Output;

/// mark - dual-format blog entry renderer.
#[derive(Parser)]
#[command(name = "mark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render entries into HTML and AMP pages.
    Render(RenderArgs),
    /// Check that entries render, without writing files.
    Check(CheckArgs),
    /// Write the archive index of the site.
    Archive(ArchiveArgs),
    /// Rebuild every entry of the site, then its archive index.
    Build(BuildArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.common.verbose,
            Self::Check(args) => args.common.verbose,
            Self::Archive(args) => args.common.verbose,
            Self::Build(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Archive(args) => args.execute(),
        Commands::Build(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["mark", "render", "-v", "a.md", "b.md"]).unwrap();
        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_render_requires_files() {
        assert!(Cli::try_parse_from(["mark", "render"]).is_err());
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["mark", "build", "--indent", "    ", "-v"]).unwrap();
        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn test_parse_archive() {
        let cli = Cli::try_parse_from(["mark", "archive", "--root-dir", "site"]).unwrap();
        assert!(!cli.command.verbose());
        assert!(matches!(cli.command, Commands::Archive(_)));
    }
}
