//! Rendering errors.

use std::path::PathBuf;

/// Error returned when an entry cannot be rendered.
///
/// Every variant is fatal: a partially rendered page is never written.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The frame on top of the render stack belongs to a different node
    /// than the one being closed.
    #[error("Structural mismatch: expected to close {expected}, found {found}")]
    StructuralMismatch {
        /// Kind of the node being closed.
        expected: &'static str,
        /// Kind found on the render stack.
        found: &'static str,
    },
    /// The document contains a construct with no rendering rule.
    #[error("Unsupported node kind: {0}")]
    UnsupportedNodeKind(&'static str),
    /// A code block references a companion file that does not exist.
    #[error("Included code file not found: {}", .path.display())]
    MissingIncludeFile {
        /// Resolved path of the missing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A code placeholder was not found in the assembled document.
    #[error("Code placeholder {0} missing from rendered document")]
    UnresolvedPlaceholder(usize),
    /// A code placeholder occurs more than once in the assembled document.
    #[error("Code placeholder {0} appears more than once in rendered document")]
    DuplicatePlaceholder(usize),
    /// Raw markup in the entry contains the reserved code placeholder prefix.
    #[error("Raw HTML contains the reserved `<!--mark:code:` comment")]
    ReservedPlaceholder,
    /// An AMP image URL has no `#WIDTHxHEIGHT` fragment.
    #[error("Image {0} has no #WIDTHxHEIGHT size fragment")]
    MissingImageSize(String),
    /// The page template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
