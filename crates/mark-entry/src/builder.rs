//! Entry build: one markdown source in, a canonical and an AMP page out.

use std::path::{Path, PathBuf};

use mark_config::Config;
use mark_renderer::{
    AmpBackend, DocumentTemplate, PageContext, StandardBackend, Stylesheets, parse,
    render_document, sectionize_root,
};

use crate::description;
use crate::error::EntryError;
use crate::front::{self, TagLine};
use crate::paths::EntryPaths;

/// Both rendered pages of an entry.
#[derive(Debug)]
pub struct EntryOutput {
    pub paths: EntryPaths,
    /// Title from the tag line.
    pub title: String,
    pub tags: Vec<String>,
    /// Canonical page.
    pub html: String,
    /// AMP page.
    pub amp: String,
}

/// Builds entries with the templates and assets of a [`Config`].
pub struct EntryBuilder<'a> {
    config: &'a Config,
}

impl<'a> EntryBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render both pages of the entry at `source` and write them next to it.
    ///
    /// Nothing is written unless both pages render.
    pub fn build(&self, source: &Path) -> Result<EntryOutput, EntryError> {
        let output = self.render(source)?;

        write(&output.paths.html_target, &output.html)?;
        write(&output.paths.amp_target, &output.amp)?;

        tracing::info!(
            html = %output.paths.html_target.display(),
            amp = %output.paths.amp_target.display(),
            "Wrote entry"
        );
        Ok(output)
    }

    /// Render both pages of the entry at `source` without writing anything.
    pub fn render(&self, source: &Path) -> Result<EntryOutput, EntryError> {
        let markdown = read(source)?;
        let TagLine {
            tags,
            title,
            markdown,
        } = front::parse_tag_line(&markdown)?;
        let description = description::extract(&markdown)?;
        let paths = EntryPaths::from_source(source, &self.config.site_resolved.root_dir)?;
        tracing::debug!(path = %source.display(), ?tags, "Parsed tag line");

        let mut root = parse(&markdown)?;
        sectionize_root(&mut root);

        let assets = &self.config.assets_resolved;
        let mut page = PageContext {
            canonical: paths.canonical.clone(),
            amp: paths.amp.clone(),
            date: paths.date.clone(),
            tags: tags.clone(),
            description,
            indent: self.config.render.indent.clone(),
            source_dir: paths.dir.clone(),
            stylesheets: Stylesheets {
                article: assets.article_css.clone(),
                pre: assets.pre_css.clone(),
            },
            amp_style: String::new(),
        };

        let templates = &self.config.templates_resolved;
        let meta = read_template(&templates.meta)?;

        let standard = DocumentTemplate::new(read_template(&templates.page)?, meta.clone());
        let html = render_document::<StandardBackend>(&root, &page, &standard)?;

        page.amp_style = self.amp_style()?;
        let amp_template = DocumentTemplate::new(read_template(&templates.amp)?, meta);
        let amp = render_document::<AmpBackend>(&root, &page, &amp_template)?;

        tracing::info!(path = %source.display(), title = %title, "Rendered entry");
        Ok(EntryOutput {
            paths,
            title,
            tags,
            html,
            amp,
        })
    }

    /// Concatenate the AMP stylesheet files.
    fn amp_style(&self) -> Result<String, EntryError> {
        let styles = self
            .config
            .assets_resolved
            .amp_styles
            .iter()
            .map(PathBuf::as_path)
            .map(read)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(styles.join("\n"))
    }
}

fn read(path: &Path) -> Result<String, EntryError> {
    std::fs::read_to_string(path).map_err(EntryError::io(path))
}

/// Read a template, trimmed.
fn read_template(path: &Path) -> Result<String, EntryError> {
    Ok(read(path)?.trim().to_owned())
}

fn write(path: &Path, content: &str) -> Result<(), EntryError> {
    std::fs::write(path, content).map_err(EntryError::io(path))
}
