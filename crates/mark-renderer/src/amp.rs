//! AMP backend for the accelerated mobile page.
//!
//! AMP pages inline their styles in the template, only allow sized media and
//! reject arbitrary iframes.

use std::fmt::Write;

use crate::backend::{RenderBackend, Stylesheets, Variant};
use crate::error::RenderError;
use crate::util::escape_html;

/// AMP render backend.
///
/// Produces AMP HTML with:
/// - no stylesheet links (styles are inlined by the page template)
/// - `<amp-img layout=responsive>` sized from the `#WIDTHxHEIGHT` URL fragment
/// - iframes dropped from raw markup
pub struct AmpBackend;

impl RenderBackend for AmpBackend {
    const VARIANT: Variant = Variant::Amp;

    fn article(wrapped: &str, _stylesheets: &Stylesheets, out: &mut String) {
        out.push_str(wrapped);
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) -> Result<(), RenderError> {
        let (width, height) =
            image_size(src).ok_or_else(|| RenderError::MissingImageSize(src.to_owned()))?;
        write!(
            out,
            r#"<amp-img layout=responsive src={} alt="{}" title="{}" width={width} height={height}>"#,
            escape_html(src),
            escape_html(alt),
            escape_html(title)
        )
        .unwrap();
        Ok(())
    }

    fn raw_html(value: &str, out: &mut String) {
        if value.contains("<iframe") {
            tracing::debug!("Dropped iframe from AMP page");
            return;
        }
        out.push_str(value);
        out.push('\n');
    }
}

/// Parse `WIDTHxHEIGHT` from the URL fragment.
fn image_size(src: &str) -> Option<(u32, u32)> {
    let (_, fragment) = src.split_once('#')?;
    let (width, height) = fragment.split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::push_code_block;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_article_has_no_stylesheet() {
        let mut out = String::new();
        AmpBackend::article("<article>\n</article>", &Stylesheets::default(), &mut out);
        assert_eq!(out, "<article>\n</article>");
    }

    #[test]
    fn test_code_block_has_no_stylesheet() {
        let mut out = String::new();
        AmpBackend::code_block(Some("js"), "X", &Stylesheets::default(), &mut out);
        let mut expected = String::new();
        push_code_block(Some("js"), "X", &mut expected);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_image_sized_from_fragment() {
        let mut out = String::new();
        AmpBackend::image("/img/a.png#640x480", "Alt", "Title", &mut out).unwrap();
        assert_eq!(
            out,
            r#"<amp-img layout=responsive src=/img/a.png#640x480 alt="Alt" title="Title" width=640 height=480>"#
        );
    }

    #[test]
    fn test_image_without_size_fails() {
        let mut out = String::new();
        let err = AmpBackend::image("/img/a.png", "", "", &mut out).unwrap_err();
        assert!(matches!(err, RenderError::MissingImageSize(ref src) if src == "/img/a.png"));

        let err = AmpBackend::image("/img/a.png#wide", "", "", &mut out).unwrap_err();
        assert!(matches!(err, RenderError::MissingImageSize(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_iframe_dropped() {
        let mut out = String::new();
        AmpBackend::raw_html(r#"<iframe src="https://example.com"></iframe>"#, &mut out);
        assert_eq!(out, "");
    }

    #[test]
    fn test_other_html_kept() {
        let mut out = String::new();
        AmpBackend::raw_html("<div>ok</div>", &mut out);
        assert_eq!(out, "<div>ok</div>\n");
    }

    #[test]
    fn test_image_size() {
        assert_eq!(image_size("a.png#1x2"), Some((1, 2)));
        assert_eq!(image_size("a.png"), None);
        assert_eq!(image_size("a.png#12"), None);
    }
}
