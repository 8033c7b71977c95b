//! Shared string helpers for markup generation.

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}

/// Replace spaces with `+` for use in heading anchors.
#[must_use]
pub fn unspace(s: &str) -> String {
    s.replace(' ', "+")
}

/// Indent every line of `content` and surround it with `open` and `close`.
///
/// The content starts on its own line after `open`, and `close` starts on a
/// fresh line after the content.
pub(crate) fn wrap(open: &str, content: &str, close: &str, indent: &str) -> String {
    let mut out = String::with_capacity(open.len() + content.len() + close.len() + 16);
    out.push_str(open);
    out.push('\n');
    out.push_str(indent);
    out.push_str(&content.replace('\n', &format!("\n{indent}")));
    out.push('\n');
    out.push_str(close);
    out
}
