//! Per-kind markup rules and page assembly.

use std::fmt::Write;
use std::marker::PhantomData;
use std::path::PathBuf;

use minijinja::context;

use crate::backend::{RenderBackend, Stylesheets};
use crate::code_store::{CodeStore, PLACEHOLDER_PREFIX, placeholder};
use crate::dispatch::{self, NodeRules};
use crate::error::RenderError;
use crate::node::{Node, NodeKind};
use crate::template::DocumentTemplate;
use crate::util::{escape_html, unspace, wrap};

/// Per-entry values shared by both variants of a page.
#[derive(Clone, Debug)]
pub struct PageContext {
    /// Site-relative path of the canonical page.
    pub canonical: String,
    /// Site-relative path of the AMP page.
    pub amp: String,
    /// Publication date, shown above the title.
    pub date: String,
    pub tags: Vec<String>,
    /// HTML-escaped summary for the meta template.
    pub description: String,
    /// Indentation added per nesting level of block wrappers.
    pub indent: String,
    /// Directory that included code files are resolved against.
    pub source_dir: PathBuf,
    pub stylesheets: Stylesheets,
    /// Inline style sheet for the AMP page template.
    pub amp_style: String,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            canonical: String::new(),
            amp: String::new(),
            date: String::new(),
            tags: Vec::new(),
            description: String::new(),
            indent: "  ".to_owned(),
            source_dir: PathBuf::from("."),
            stylesheets: Stylesheets::default(),
            amp_style: String::new(),
        }
    }
}

/// Renders one variant of a page.
///
/// Rules shared by both variants live here; the ones that differ are
/// delegated to the backend `B`.
pub struct Renderer<'a, B: RenderBackend> {
    page: &'a PageContext,
    template: &'a DocumentTemplate,
    codes: CodeStore,
    /// Text of the first-level heading, once rendered.
    title: Option<String>,
    _backend: PhantomData<B>,
}

impl<'a, B: RenderBackend> Renderer<'a, B> {
    #[must_use]
    pub fn new(page: &'a PageContext, template: &'a DocumentTemplate) -> Self {
        Self {
            page,
            template,
            codes: CodeStore::new(),
            title: None,
            _backend: PhantomData,
        }
    }

    /// Title recorded from the first-level heading.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number of code blocks extracted so far.
    #[must_use]
    pub fn code_blocks(&self) -> usize {
        self.codes.len()
    }

    /// Substitute `body` into the page template and restore the code blocks.
    pub fn finalize(self, body: &str) -> Result<String, RenderError> {
        let page = self.page;
        let document = self.template.render(context! {
            body,
            title => self.title.unwrap_or_default(),
            description => &page.description,
            canonical => &page.canonical,
            amp => &page.amp,
            date => &page.date,
            tags => &page.tags,
            style => &page.amp_style,
            variant => B::VARIANT.name(),
        })?;
        self.codes.reinsert(&document)
    }

    fn wrap(&self, open: &str, content: &str, close: &str) -> String {
        wrap(open, content, close, &self.page.indent)
    }

    fn title_heading(&mut self, content: &str, out: &mut String) {
        let date = &self.page.date;
        write!(
            out,
            "<div><time datetime={date}>{date}</time><span class=tags>"
        )
        .unwrap();
        for tag in &self.page.tags {
            write!(out, "<a>{}</a>", escape_html(tag)).unwrap();
        }
        out.push_str("</span></div>\n");
        writeln!(
            out,
            r#"<h1><a href="/{}">{content}</a></h1>"#,
            self.page.canonical
        )
        .unwrap();
        self.title = Some(content.to_owned());
    }
}

impl<B: RenderBackend> NodeRules for Renderer<'_, B> {
    fn render_node(&mut self, kind: &NodeKind, content: &str) -> Result<String, RenderError> {
        let mut out = String::new();
        match kind {
            NodeKind::Root => out = self.wrap("<main>", content, "</main>"),
            NodeKind::Article => {
                let wrapped = self.wrap("<article>", content, "</article>");
                B::article(&wrapped, &self.page.stylesheets, &mut out);
            }
            NodeKind::Section => out = self.wrap("<section>", content, "</section>\n"),
            NodeKind::Heading { depth: 1 } => self.title_heading(content, &mut out),
            NodeKind::Heading { depth } => {
                let id = unspace(content);
                writeln!(
                    out,
                    r##"<h{depth} id="{id}"><a href="#{id}">{content}</a></h{depth}>"##
                )
                .unwrap();
            }
            NodeKind::Paragraph => {
                writeln!(out, "<p>{content}").unwrap();
            }
            NodeKind::List { ordered: true } => out = self.wrap("<ol>", content, "</ol>\n"),
            NodeKind::List { ordered: false } => out = self.wrap("<ul>", content, "</ul>\n"),
            NodeKind::ListItem => {
                writeln!(out, "<li>{content}").unwrap();
            }
            NodeKind::Blockquote => {
                writeln!(out, "<blockquote>{content}</blockquote>").unwrap();
            }
            NodeKind::Code { lang } => {
                let (index, lang) =
                    self.codes
                        .extract(content, lang.as_deref(), &self.page.source_dir)?;
                B::code_block(
                    lang.as_deref(),
                    &placeholder(index),
                    &self.page.stylesheets,
                    &mut out,
                );
            }
            NodeKind::InlineCode => {
                write!(out, "<code>{}</code>", escape_html(content)).unwrap();
            }
            NodeKind::Link { url } => {
                write!(out, r#"<a href="{}">{content}</a>"#, escape_html(url)).unwrap();
            }
            NodeKind::Image { url, alt, title } => B::image(url, alt, title, &mut out)?,
            NodeKind::Strong => {
                write!(out, "<strong>{content}</strong>").unwrap();
            }
            NodeKind::Emphasis => {
                write!(out, "<em>{content}</em>").unwrap();
            }
            NodeKind::Html => {
                if content.contains(PLACEHOLDER_PREFIX) {
                    return Err(RenderError::ReservedPlaceholder);
                }
                B::raw_html(content, &mut out);
            }
            NodeKind::Text => out.push_str(content),
            NodeKind::ThematicBreak => out.push_str("<hr>"),
        }
        Ok(out)
    }
}

/// Render one variant of a sectioned document into a complete page.
///
/// Every call uses a fresh [`CodeStore`], so the two variants of an entry
/// never share placeholders.
pub fn render_document<B: RenderBackend>(
    root: &Node,
    page: &PageContext,
    template: &DocumentTemplate,
) -> Result<String, RenderError> {
    let mut renderer = Renderer::<B>::new(page, template);
    let body = dispatch::render(root, &mut renderer)?;
    tracing::debug!(
        variant = B::VARIANT.name(),
        code_blocks = renderer.code_blocks(),
        "Rendered document body"
    );
    renderer.finalize(&body)
}
