//! Entry pipeline errors.

use std::path::PathBuf;

use mark_renderer::RenderError;

/// Error returned when an entry cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The first line carries no `# [tag]...` annotation.
    #[error("There is no tags line (expected `# [tag][tag] Title`)")]
    MissingTags,
    /// The entry has no `## Intro` section to describe it.
    #[error("There is no `## Intro` section")]
    MissingIntro,
    /// The entry is not located under the site root.
    #[error("{} is not inside site root {}", .path.display(), .root.display())]
    OutsideSite {
        /// Entry source path.
        path: PathBuf,
        /// Configured site root.
        root: PathBuf,
    },
    /// I/O error on a specific file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Archive template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    /// Invalid entry search pattern.
    #[error("Invalid entry pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl EntryError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
