//! `mark build` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Block indentation (overrides config).
    #[arg(long)]
    indent: Option<String>,

    #[command(flatten)]
    pub common: ConfigArgs,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// Removes stale pages, renders every entry newest first and writes the
    /// archive index. The first failing entry stops the build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load(self.indent)?;

        output.info(&format!(
            "Building {}...",
            config.site_resolved.root_dir.display()
        ));
        let site = mark_entry::build_site(&config)?;

        output.detail(&format!("{} stale pages removed", site.removed));
        for entry in &site.entries {
            output.detail(&entry.paths.html_target.display().to_string());
        }
        output.success(&format!(
            "Built {} entries and {}",
            site.entries.len(),
            site.archive.path.display()
        ));
        Ok(())
    }
}
