//! `mark check` command implementation.

use std::path::PathBuf;

use clap::Args;
use mark_entry::EntryBuilder;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Entry markdown files.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Block indentation (overrides config).
    #[arg(long)]
    indent: Option<String>,

    #[command(flatten)]
    pub common: ConfigArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Every entry is rendered in memory; all failures are reported.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load(self.indent)?;
        let builder = EntryBuilder::new(&config);

        let mut failed = 0;
        for file in &self.files {
            match builder.render(file) {
                Ok(entry) => output.success(&format!("ok   {} ({})", file.display(), entry.title)),
                Err(err) => {
                    failed += 1;
                    output.error(&format!("fail {}", file.display()));
                    output.detail(&err.to_string());
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Check(format!(
                "{failed} of {} entries failed",
                self.files.len()
            )));
        }
        Ok(())
    }
}
