//! Tag line parsing.
//!
//! An entry starts with its title heading annotated by tags:
//!
//! ```text
//! # [http][performance] Title of the entry
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::EntryError;

static TAG_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[ \t]+((?:\[[^\]]+\])+)[ \t]*(.*)$").unwrap());

/// Tags and title taken from the first line of an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagLine {
    /// Tags in source order.
    pub tags: Vec<String>,
    /// Heading text following the tags.
    pub title: String,
    /// Entry markdown with the tags removed from the heading.
    pub markdown: String,
}

/// Split the tag annotation off the first non-empty line of `markdown`.
pub fn parse_tag_line(markdown: &str) -> Result<TagLine, EntryError> {
    let line = markdown
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or(EntryError::MissingTags)?;
    let caps = TAG_LINE_RE
        .captures(line.trim_end())
        .ok_or(EntryError::MissingTags)?;

    let run = &caps[1];
    let tags = run[1..run.len() - 1]
        .split("][")
        .map(ToOwned::to_owned)
        .collect();
    let title = caps[2].trim().to_owned();

    Ok(TagLine {
        tags,
        title,
        markdown: markdown.replacen(&format!(" {run}"), "", 1),
    })
}
