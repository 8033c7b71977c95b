//! Standard backend for the canonical HTML page.

use std::fmt::Write;

use crate::backend::{RenderBackend, Stylesheets, Variant, push_code_block, push_stylesheet};
use crate::error::RenderError;
use crate::util::escape_html;

/// Canonical page render backend.
///
/// Produces plain HTML with:
/// - stylesheet links in front of the article and of each code block
/// - `<img>` for images
/// - raw markup (including iframes) passed through
pub struct StandardBackend;

impl RenderBackend for StandardBackend {
    const VARIANT: Variant = Variant::Standard;

    fn article(wrapped: &str, stylesheets: &Stylesheets, out: &mut String) {
        push_stylesheet(&stylesheets.article, out);
        out.push_str(wrapped);
    }

    fn code_block(lang: Option<&str>, body: &str, stylesheets: &Stylesheets, out: &mut String) {
        push_stylesheet(&stylesheets.pre, out);
        push_code_block(lang, body, out);
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) -> Result<(), RenderError> {
        write!(
            out,
            r#"<img src={} alt="{}" title="{}">"#,
            escape_html(src),
            escape_html(alt),
            escape_html(title)
        )
        .unwrap();
        Ok(())
    }
}
