//! Entry locations: source, output files and site URLs.

use std::path::{Component, Path, PathBuf};

use crate::error::EntryError;

/// Paths and URLs derived from an entry source file.
///
/// Entries live at `<site root>/<...>/<date>/<name>.md`; both pages are
/// written next to the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryPaths {
    /// Directory holding the entry (and its included code files).
    pub dir: PathBuf,
    /// Source file stem.
    pub name: String,
    /// Name of the entry directory, used as the publication date.
    pub date: String,
    /// Entry directory relative to the site root, `/`-separated.
    pub base_url: String,
    /// Site-relative URL of the canonical page.
    pub canonical: String,
    /// Site-relative URL of the AMP page.
    pub amp: String,
    /// Output file of the canonical page.
    pub html_target: PathBuf,
    /// Output file of the AMP page.
    pub amp_target: PathBuf,
}

impl EntryPaths {
    /// Derive the paths of the entry at `source` inside `site_root`.
    pub fn from_source(source: &Path, site_root: &Path) -> Result<Self, EntryError> {
        let outside = || EntryError::OutsideSite {
            path: source.to_path_buf(),
            root: site_root.to_path_buf(),
        };

        let source_abs = std::path::absolute(source).map_err(EntryError::io(source))?;
        let root_abs = std::path::absolute(site_root).map_err(EntryError::io(site_root))?;

        let dir = source.parent().ok_or_else(outside)?.to_path_buf();
        let name = source
            .file_stem()
            .ok_or_else(outside)?
            .to_string_lossy()
            .into_owned();

        let relative_dir = source_abs
            .parent()
            .and_then(|parent| parent.strip_prefix(&root_abs).ok())
            .ok_or_else(outside)?;
        let segments: Vec<String> = relative_dir
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let date = segments.last().cloned().ok_or_else(outside)?;
        let base_url = segments.join("/");

        Ok(Self {
            html_target: dir.join(format!("{name}.html")),
            amp_target: dir.join(format!("{name}.amp.html")),
            canonical: format!("{base_url}/{name}.html"),
            amp: format!("{base_url}/{name}.amp.html"),
            dir,
            name,
            date,
            base_url,
        })
    }
}
