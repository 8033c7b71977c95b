//! `mark render` command implementation.

use std::path::PathBuf;

use clap::Args;
use mark_entry::EntryBuilder;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Entry markdown files.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Block indentation (overrides config).
    #[arg(long)]
    indent: Option<String>,

    #[command(flatten)]
    pub common: ConfigArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Entries are rendered in order; the first failure stops the run.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load(self.indent)?;
        let builder = EntryBuilder::new(&config);

        for file in &self.files {
            output.info(&format!("Rendering {}...", file.display()));
            let entry = builder.build(file)?;
            output.detail(&entry.paths.html_target.display().to_string());
            output.detail(&entry.paths.amp_target.display().to_string());
        }

        output.success(&format!("Rendered {} entries", self.files.len()));
        Ok(())
    }
}
