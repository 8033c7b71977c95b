//! CLI command implementations.

pub(crate) mod archive;
pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use mark_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use archive::ArchiveArgs;
pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

/// Configuration arguments shared by every command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover mark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root directory (overrides config).
    #[arg(short, long)]
    root_dir: Option<PathBuf>,

    /// Enable verbose output (log every rendered entry).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConfigArgs {
    /// Load the configuration with the command line overrides applied.
    pub(crate) fn load(&self, indent: Option<String>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            root_dir: self.root_dir.clone(),
            indent,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config = ?config.config_path,
            root = %config.site_resolved.root_dir.display(),
            "Loaded configuration"
        );
        Ok(config)
    }
}
