//! Whole-site build: every entry, then the archive.

use std::path::Path;

use mark_config::Config;

use crate::archive::{ArchiveOutput, find_entries, glob_files, write_archive};
use crate::builder::{EntryBuilder, EntryOutput};
use crate::error::EntryError;

/// Result of a site build.
#[derive(Debug)]
pub struct SiteOutput {
    /// Number of stale pages removed before building.
    pub removed: usize,
    /// Built entries, newest first.
    pub entries: Vec<EntryOutput>,
    pub archive: ArchiveOutput,
}

/// Delete every generated page under `<site root>/entries`.
///
/// Returns the number of files removed.
pub fn remove_stale_pages(site_root: &Path) -> Result<usize, EntryError> {
    let pages = glob_files(&site_root.join("entries").join("**").join("*.html"))?;
    for page in &pages {
        std::fs::remove_file(page).map_err(EntryError::io(page))?;
    }
    tracing::info!(removed = pages.len(), "Removed stale pages");
    Ok(pages.len())
}

/// Rebuild the whole site: clear old pages, build every entry newest first,
/// then write the archive index.
///
/// Stops at the first entry that fails to build.
pub fn build_site(config: &Config) -> Result<SiteOutput, EntryError> {
    let root = &config.site_resolved.root_dir;
    let removed = remove_stale_pages(root)?;

    let builder = EntryBuilder::new(config);
    let entries = find_entries(root)?
        .iter()
        .map(|source| builder.build(source))
        .collect::<Result<Vec<_>, _>>()?;

    let archive = write_archive(config)?;
    Ok(SiteOutput {
        removed,
        entries,
        archive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(base: &Path, path: &str, content: &str) {
        let path = base.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(base, ".template/simple.html", "<html>{{ body }}</html>");
        write(base, ".template/amp.html", "<html amp>{{ body }}</html>");
        write(base, ".template/meta.html", "");
        write(base, ".template/archive.html", "<a href={{ top }}>top</a>{{ entries }}");
        write(
            base,
            "mark.toml",
            "[site]\nroot_dir = \"site\"\n\n[assets]\namp_styles = [\"css/a.css\"]\n",
        );
        write(base, "css/a.css", "a{}");
        dir
    }

    #[test]
    fn test_build_site() {
        let dir = site();
        let base = dir.path();
        write(base, "site/entries/2016-01-01/old.md", "# [a] Old\n\n## Intro\n\nold\n");
        write(base, "site/entries/2016-02-01/new.md", "# [b] New\n\n## Intro\n\nnew\n");
        write(base, "site/entries/2015-12-31/gone.html", "stale");
        write(base, "site/entries/2016-01-01/old.html", "stale");

        let config = Config::load(Some(&base.join("mark.toml")), None).unwrap();
        let output = build_site(&config).unwrap();

        assert_eq!(output.removed, 2);
        assert!(!base.join("site/entries/2015-12-31/gone.html").exists());

        let titles: Vec<&str> = output.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
        for entry in &output.entries {
            assert!(entry.paths.html_target.exists());
            assert!(entry.paths.amp_target.exists());
        }
        let old = std::fs::read_to_string(base.join("site/entries/2016-01-01/old.html")).unwrap();
        assert!(old.starts_with("<html><main>"));

        assert_eq!(output.archive.entries, 2);
        let index = std::fs::read_to_string(base.join("site/index.html")).unwrap();
        assert!(index.starts_with("<a href=entries/2016-02-01/new.html>top</a><li>"));
    }

    #[test]
    fn test_build_site_stops_at_broken_entry() {
        let dir = site();
        let base = dir.path();
        write(base, "site/entries/2016-01-01/bad.md", "# No tags\n");

        let config = Config::load(Some(&base.join("mark.toml")), None).unwrap();
        let err = build_site(&config).unwrap_err();
        assert!(matches!(err, EntryError::MissingTags));
        assert!(!base.join("site/index.html").exists());
    }

    #[test]
    fn test_remove_stale_pages_keeps_sources() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(base, "entries/2016-01-01/a.md", "# [a] A\n");
        write(base, "entries/2016-01-01/a.html", "");
        write(base, "entries/2016-01-01/a.amp.html", "");
        write(base, "index.html", "");

        assert_eq!(remove_stale_pages(base).unwrap(), 2);
        assert!(base.join("entries/2016-01-01/a.md").exists());
        assert!(base.join("index.html").exists());
    }
}
