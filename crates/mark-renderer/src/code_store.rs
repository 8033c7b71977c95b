//! Deferred code block bodies.
//!
//! Block wrappers are re-indented as the tree is rendered, which would corrupt
//! the whitespace of code. Code bodies are therefore captured in a
//! [`CodeStore`] while rendering, a [`placeholder`] goes into the markup in
//! their place, and [`CodeStore::reinsert`] swaps the escaped bodies back in
//! once the whole page is assembled.

use std::path::Path;

use crate::error::RenderError;
use crate::util::escape_html;

/// Start of every code placeholder. Raw markup carrying it is rejected.
pub const PLACEHOLDER_PREFIX: &str = "<!--mark:code:";

/// Placeholder token for the code block at 1-based `index`.
///
/// Escaped text can never produce `<!--` and raw markup containing
/// [`PLACEHOLDER_PREFIX`] is refused, so a placeholder only appears where the
/// renderer put it.
#[must_use]
pub fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{index}-->")
}

/// Ordered, append-only store of raw code block bodies.
#[derive(Debug, Default)]
pub struct CodeStore {
    bodies: Vec<String>,
}

impl CodeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a code block body and return its 1-based index and effective language.
    ///
    /// An empty `body` whose `lang_spec` has the form `language:filename`
    /// includes `filename` from `source_dir` instead; the returned language is
    /// then `language`.
    pub fn extract(
        &mut self,
        body: &str,
        lang_spec: Option<&str>,
        source_dir: &Path,
    ) -> Result<(usize, Option<String>), RenderError> {
        let include = if body.is_empty() {
            lang_spec.and_then(|spec| spec.split_once(':'))
        } else {
            None
        };

        let (stored, lang) = match include {
            Some((lang, file)) => {
                let path = source_dir.join(file);
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| RenderError::MissingIncludeFile { path: path.clone(), source })?;
                tracing::debug!(path = %path.display(), "Included code file");
                (content.trim().to_owned(), Some(lang.to_owned()))
            }
            None => (body.to_owned(), lang_spec.map(ToOwned::to_owned)),
        };

        self.bodies.push(stored);
        Ok((self.bodies.len(), lang))
    }

    /// Number of stored bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Replace every placeholder in `document` with its HTML-escaped body.
    ///
    /// Each placeholder must appear exactly once; it is replaced in store order.
    pub fn reinsert(&self, document: &str) -> Result<String, RenderError> {
        let mut result = document.to_owned();
        for (i, body) in self.bodies.iter().enumerate() {
            let index = i + 1;
            let token = placeholder(index);
            let start = result
                .find(&token)
                .ok_or(RenderError::UnresolvedPlaceholder(index))?;
            let end = start + token.len();
            if result[end..].contains(&token) {
                return Err(RenderError::DuplicatePlaceholder(index));
            }
            result.replace_range(start..end, &escape_html(body));
        }
        Ok(result)
    }
}
