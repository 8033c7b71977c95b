//! `mark archive` command implementation.

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the archive command.
#[derive(Args)]
pub(crate) struct ArchiveArgs {
    #[command(flatten)]
    pub common: ConfigArgs,
}

impl ArchiveArgs {
    /// Execute the archive command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load(None)?;

        output.info(&format!(
            "Indexing {}...",
            config.site_resolved.root_dir.display()
        ));
        let archive = mark_entry::write_archive(&config)?;
        output.success(&format!(
            "Wrote {} ({} entries)",
            archive.path.display(),
            archive.entries
        ));
        Ok(())
    }
}
