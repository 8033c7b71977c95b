//! Render backend trait for format-specific rendering.
//!
//! The canonical page and its AMP counterpart share almost every rule; this
//! trait captures the few places where they differ, allowing [`Renderer`]
//! to be generic over the output format.
//!
//! [`Renderer`]: crate::Renderer

use crate::error::RenderError;

/// Output format of a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Canonical HTML page, linking to its AMP counterpart.
    Standard,
    /// AMP page.
    Amp,
}

impl Variant {
    /// Lower-case name, exposed to templates as `variant`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Amp => "amp",
        }
    }
}

/// Stylesheet URLs linked from the canonical page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stylesheets {
    /// Linked before the article wrapper.
    pub article: String,
    /// Linked before every code block.
    pub pre: String,
}

impl Default for Stylesheets {
    fn default() -> Self {
        Self {
            article: "//www.jxck.io/assets/css/article.css".to_owned(),
            pre: "//www.jxck.io/assets/css/pre.css".to_owned(),
        }
    }
}

/// Backend trait for format-specific rendering operations.
///
/// Implementations provide format-specific rendering for:
/// - The article wrapper (Standard links the article stylesheet)
/// - Code blocks (Standard links the code stylesheet)
/// - Images (AMP uses a sized, responsive `<amp-img>`)
/// - Raw markup (AMP drops iframes)
pub trait RenderBackend {
    /// Output format produced by this backend.
    const VARIANT: Variant;

    /// Render the article wrapper around already wrapped and indented content.
    fn article(wrapped: &str, stylesheets: &Stylesheets, out: &mut String);

    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "js")
    /// * `body` - Placeholder standing in for the code body
    /// * `_stylesheets` - Stylesheets to link, unused unless the backend links them
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, body: &str, _stylesheets: &Stylesheets, out: &mut String) {
        push_code_block(lang, body, out);
    }

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text for the image
    /// * `title` - Title attribute (may be empty)
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, title: &str, out: &mut String) -> Result<(), RenderError>;

    /// Render raw markup.
    ///
    /// Default passes the markup through followed by a newline.
    fn raw_html(value: &str, out: &mut String) {
        out.push_str(value);
        out.push('\n');
    }
}

/// Write a stylesheet link line.
pub(crate) fn push_stylesheet(href: &str, out: &mut String) {
    out.push_str("<link rel=stylesheet type=text/css href=");
    out.push_str(href);
    out.push('>');
    out.push('\n');
}

/// Write the `<pre>` block shared by both variants.
pub(crate) fn push_code_block(lang: Option<&str>, body: &str, out: &mut String) {
    match lang {
        Some(lang) => {
            out.push_str("<pre class=");
            out.push_str(lang);
            out.push('>');
        }
        None => out.push_str("<pre>"),
    }
    out.push_str("<code>");
    out.push_str(body);
    out.push_str("</code></pre>\n");
}
