//! Page description taken from the entry's Intro section.

use std::sync::LazyLock;

use mark_renderer::escape_html;
use regex::Regex;

use crate::error::EntryError;

/// Maximum description length in characters, before the ellipsis.
const MAX_CHARS: usize = 140;

static INTRO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)## Intro(.*?)(?:##|\z)").unwrap());

/// Extract the HTML-escaped summary of the `## Intro` section.
///
/// The Intro text runs to the next `##` (or the end of the entry), with line
/// breaks removed and cut to 140 characters followed by `...`.
pub fn extract(markdown: &str) -> Result<String, EntryError> {
    let caps = INTRO_RE
        .captures(markdown)
        .ok_or(EntryError::MissingIntro)?;

    let intro: String = caps[1]
        .trim()
        .chars()
        .filter(|&c| c != '\n' && c != '\r')
        .take(MAX_CHARS)
        .collect();

    Ok(escape_html(&format!("{intro}...")))
}
