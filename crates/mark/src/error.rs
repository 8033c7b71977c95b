//! CLI error types.

use mark_config::ConfigError;
use mark_entry::EntryError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Entry(#[from] EntryError),

    #[error("{0}")]
    Check(String),
}
