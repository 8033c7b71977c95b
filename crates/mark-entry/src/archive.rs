//! Site archive: the index page listing every entry, newest first.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use mark_config::Config;
use mark_renderer::escape_html;
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;

use crate::error::EntryError;
use crate::front;
use crate::paths::EntryPaths;

/// Separator between archive list items.
const ITEM_SEPARATOR: &str = "\n    ";

/// One line of the archive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    pub date: String,
    /// Site-relative URL of the canonical page.
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
}

impl ArchiveEntry {
    /// Read the tag line of the entry at `source`.
    pub fn from_source(source: &Path, site_root: &Path) -> Result<Self, EntryError> {
        let markdown = std::fs::read_to_string(source).map_err(EntryError::io(source))?;
        let tag_line = front::parse_tag_line(&markdown)?;
        let paths = EntryPaths::from_source(source, site_root)?;

        Ok(Self {
            date: paths.date,
            url: paths.canonical,
            title: tag_line.title,
            tags: tag_line.tags,
        })
    }

    /// Render the entry as an archive list item.
    ///
    /// Tags are listed last-first.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let tags: Vec<String> = self
            .tags
            .iter()
            .rev()
            .map(|tag| format!("<a>{}</a>", escape_html(tag)))
            .collect();

        let mut out = String::new();
        write!(
            out,
            "<li><time datetime={date}>{date}</time><a href={url}>{title}</a><span class=tags>[{tags}]</span>",
            date = self.date,
            url = self.url,
            title = self.title,
            tags = tags.join(","),
        )
        .unwrap();
        out
    }
}

/// Result of writing the archive.
#[derive(Debug)]
pub struct ArchiveOutput {
    /// Written index file.
    pub path: PathBuf,
    /// Number of entries listed.
    pub entries: usize,
}

/// Entry sources under `<site root>/entries`, newest first.
pub fn find_entries(site_root: &Path) -> Result<Vec<PathBuf>, EntryError> {
    let mut sources = glob_files(&site_root.join("entries").join("**").join("*.md"))?;
    sources.sort_by(|a, b| b.cmp(a));
    Ok(sources)
}

/// Files matching a glob `pattern`, in walk order.
pub(crate) fn glob_files(pattern: &Path) -> Result<Vec<PathBuf>, EntryError> {
    let mut files = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        match entry {
            Ok(path) => files.push(path),
            Err(err) => {
                let path = err.path().to_path_buf();
                return Err(EntryError::Io {
                    path,
                    source: err.into(),
                });
            }
        }
    }
    Ok(files)
}

/// Render the archive page from its template.
///
/// The template receives `entries` (the joined list items), `top` (URL of the
/// newest entry) and `items` (the entries themselves).
pub fn render_archive(entries: &[ArchiveEntry], template: &str) -> Result<String, EntryError> {
    let markup: Vec<String> = entries.iter().map(ArchiveEntry::to_markup).collect();
    let top = entries.first().map(|entry| entry.url.as_str()).unwrap_or_default();

    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    let page = env.render_str(
        template,
        context! {
            entries => markup.join(ITEM_SEPARATOR),
            top,
            items => entries,
        },
    )?;
    Ok(page)
}

/// Build `<site root>/index.html` listing every entry.
pub fn write_archive(config: &Config) -> Result<ArchiveOutput, EntryError> {
    let root = &config.site_resolved.root_dir;
    let template_path = &config.templates_resolved.archive;

    let entries = find_entries(root)?
        .iter()
        .map(|source| {
            tracing::debug!(path = %source.display(), "Indexing entry");
            ArchiveEntry::from_source(source, root)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let template =
        std::fs::read_to_string(template_path).map_err(EntryError::io(template_path))?;
    let page = render_archive(&entries, &template)?;

    let path = root.join("index.html");
    std::fs::write(&path, page).map_err(EntryError::io(&path))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "Wrote archive");

    Ok(ArchiveOutput {
        path,
        entries: entries.len(),
    })
}
