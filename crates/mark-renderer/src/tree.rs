//! Document tree construction from `pulldown-cmark` events.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag};

use crate::error::RenderError;
use crate::node::{Node, NodeKind};
use crate::util::escape_html;

/// Parse markdown into a `Root` node holding the flat block sequence.
///
/// Text is stored HTML-escaped. Code bodies, raw markup and image alt text
/// are stored verbatim.
pub fn parse(markdown: &str) -> Result<Node, RenderError> {
    let mut builder = TreeBuilder::new();
    for event in Parser::new(markdown) {
        builder.event(event)?;
    }
    builder.finish()
}

/// Folds a balanced event stream into nodes.
struct TreeBuilder {
    root: Node,
    /// Nodes started but not yet ended, outermost first.
    open: Vec<Node>,
    /// Tags opened inside an image; their text goes into its alt.
    alt_depth: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            root: Node::new(NodeKind::Root),
            open: Vec::new(),
            alt_depth: 0,
        }
    }

    fn in_image(&self) -> bool {
        matches!(
            self.open.last(),
            Some(Node {
                kind: NodeKind::Image { .. },
                ..
            })
        )
    }

    fn current(&mut self) -> &mut Node {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start(tag)?,
            Event::End(_) => self.end()?,
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.html_block(&html),
            Event::InlineHtml(_) | Event::HardBreak if self.in_image() => {}
            Event::InlineHtml(html) => self.push_child(Node::leaf(NodeKind::Html, html.as_ref())),
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.push_child(Node::leaf(NodeKind::Html, "<br>")),
            Event::Rule => self.push_child(Node::new(NodeKind::ThematicBreak)),
            Event::TaskListMarker(_) => {
                return Err(RenderError::UnsupportedNodeKind("task list marker"));
            }
            Event::FootnoteReference(_) => {
                return Err(RenderError::UnsupportedNodeKind("footnote"));
            }
            Event::InlineMath(_) | Event::DisplayMath(_) => {
                return Err(RenderError::UnsupportedNodeKind("math"));
            }
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) -> Result<(), RenderError> {
        if self.in_image() {
            self.alt_depth += 1;
            return Ok(());
        }
        let node = match tag {
            Tag::Paragraph => Node::new(NodeKind::Paragraph),
            Tag::Heading { level, .. } => Node::new(NodeKind::Heading {
                depth: heading_depth(level),
            }),
            Tag::BlockQuote(_) => Node::new(NodeKind::Blockquote),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(ToOwned::to_owned),
                    CodeBlockKind::Indented => None,
                };
                Node::leaf(NodeKind::Code { lang }, String::new())
            }
            Tag::HtmlBlock => Node::leaf(NodeKind::Html, String::new()),
            Tag::List(start) => Node::new(NodeKind::List {
                ordered: start.is_some(),
            }),
            Tag::Item => Node::new(NodeKind::ListItem),
            Tag::Emphasis => Node::new(NodeKind::Emphasis),
            Tag::Strong => Node::new(NodeKind::Strong),
            Tag::Link { dest_url, .. } => Node::new(NodeKind::Link {
                url: dest_url.into_string(),
            }),
            Tag::Image {
                dest_url, title, ..
            } => Node::new(NodeKind::Image {
                url: dest_url.into_string(),
                alt: String::new(),
                title: title.into_string(),
            }),
            Tag::Table(_) | Tag::TableHead | Tag::TableRow | Tag::TableCell => {
                return Err(RenderError::UnsupportedNodeKind("table"));
            }
            Tag::FootnoteDefinition(_) => return Err(RenderError::UnsupportedNodeKind("footnote")),
            Tag::MetadataBlock(_) => {
                return Err(RenderError::UnsupportedNodeKind("metadata block"));
            }
            Tag::DefinitionList | Tag::DefinitionListTitle | Tag::DefinitionListDefinition => {
                return Err(RenderError::UnsupportedNodeKind("definition list"));
            }
            Tag::Strikethrough => return Err(RenderError::UnsupportedNodeKind("strikethrough")),
            Tag::Superscript | Tag::Subscript => {
                return Err(RenderError::UnsupportedNodeKind("superscript or subscript"));
            }
        };
        self.open.push(node);
        Ok(())
    }

    fn end(&mut self) -> Result<(), RenderError> {
        if self.alt_depth > 0 {
            self.alt_depth -= 1;
            return Ok(());
        }
        let mut node = self.open.pop().ok_or(RenderError::StructuralMismatch {
            expected: "open node",
            found: "root",
        })?;

        if let Some(value) = node.value.as_mut() {
            match node.kind {
                // The fence always leaves one newline after the body
                NodeKind::Code { .. } => {
                    if value.ends_with('\n') {
                        value.pop();
                    }
                }
                NodeKind::Html => {
                    let len = value.trim_end_matches('\n').len();
                    value.truncate(len);
                }
                _ => {}
            }
        }

        self.push_child(node);
        Ok(())
    }

    fn text(&mut self, text: &str) {
        let current = self.current();
        match &mut current.kind {
            NodeKind::Code { .. } | NodeKind::Html => {
                current.value.get_or_insert_default().push_str(text);
            }
            NodeKind::Image { alt, .. } => alt.push_str(text),
            _ => {
                let escaped = escape_html(text);
                match current.children.last_mut() {
                    Some(Node {
                        kind: NodeKind::Text,
                        value: Some(value),
                        ..
                    }) => value.push_str(&escaped),
                    _ => current.children.push(Node::text(escaped)),
                }
            }
        }
    }

    fn inline_code(&mut self, code: &str) {
        let current = self.current();
        if let NodeKind::Image { alt, .. } = &mut current.kind {
            alt.push_str(code);
        } else {
            current.children.push(Node::leaf(NodeKind::InlineCode, code));
        }
    }

    fn html_block(&mut self, html: &str) {
        let current = self.current();
        if matches!(current.kind, NodeKind::Html) {
            current.value.get_or_insert_default().push_str(html);
        } else {
            current.children.push(Node::leaf(NodeKind::Html, html));
        }
    }

    fn push_child(&mut self, node: Node) {
        self.current().children.push(node);
    }

    fn finish(self) -> Result<Node, RenderError> {
        match self.open.last() {
            Some(node) => Err(RenderError::StructuralMismatch {
                expected: "root",
                found: node.kind.name(),
            }),
            None => Ok(self.root),
        }
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks(markdown: &str) -> Vec<Node> {
        parse(markdown).unwrap().children
    }

    fn para(children: Vec<Node>) -> Node {
        Node::with_children(NodeKind::Paragraph, children)
    }

    #[test]
    fn test_heading_and_paragraph() {
        let root = parse("# Title\n\nHello *world*\n").unwrap();
        assert_eq!(root.kind, NodeKind::Root);
        assert_eq!(
            root.children,
            vec![
                Node::heading(1, "Title"),
                para(vec![
                    Node::text("Hello "),
                    Node::with_children(NodeKind::Emphasis, vec![Node::text("world")]),
                ]),
            ]
        );
    }

    #[test]
    fn test_heading_levels() {
        let depths: Vec<_> = blocks("## a\n\n### b\n\n###### c\n")
            .iter()
            .filter_map(Node::heading_depth)
            .collect();
        assert_eq!(depths, vec![2, 3, 6]);
    }

    #[test]
    fn test_text_escaped_and_coalesced() {
        assert_eq!(
            blocks("a < b & c\n"),
            vec![para(vec![Node::text("a &lt; b &amp; c")])]
        );
    }

    #[test]
    fn test_soft_break_joins_text() {
        assert_eq!(blocks("one\ntwo\n"), vec![para(vec![Node::text("one\ntwo")])]);
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(
            blocks("one  \ntwo\n"),
            vec![para(vec![
                Node::text("one"),
                Node::leaf(NodeKind::Html, "<br>"),
                Node::text("two"),
            ])]
        );
    }

    #[test]
    fn test_code_block_verbatim() {
        assert_eq!(
            blocks("```rust\nif a < b {\n    go();\n}\n```\n"),
            vec![Node::leaf(
                NodeKind::Code {
                    lang: Some("rust".to_owned())
                },
                "if a < b {\n    go();\n}"
            )]
        );
    }

    #[test]
    fn test_code_block_without_lang() {
        assert_eq!(
            blocks("```\nplain\n```\n"),
            vec![Node::leaf(NodeKind::Code { lang: None }, "plain")]
        );
    }

    #[test]
    fn test_include_code_block_has_empty_body() {
        assert_eq!(
            blocks("```js:main.js\n```\n"),
            vec![Node::leaf(
                NodeKind::Code {
                    lang: Some("js:main.js".to_owned())
                },
                ""
            )]
        );
    }

    #[test]
    fn test_inline_code_verbatim() {
        assert_eq!(
            blocks("use `a<b>` here\n"),
            vec![para(vec![
                Node::text("use "),
                Node::leaf(NodeKind::InlineCode, "a<b>"),
                Node::text(" here"),
            ])]
        );
    }

    #[test]
    fn test_image_alt_collected() {
        assert_eq!(
            blocks("![Alt `x`](/img/a.png#640x480 \"Title\")\n"),
            vec![para(vec![Node::new(NodeKind::Image {
                url: "/img/a.png#640x480".to_owned(),
                alt: "Alt x".to_owned(),
                title: "Title".to_owned(),
            })])]
        );
    }

    #[test]
    fn test_image_alt_flattens_nested_markup() {
        assert_eq!(
            blocks("![a *b* __c__ `d`](x.png#1x2) after\n"),
            vec![para(vec![
                Node::new(NodeKind::Image {
                    url: "x.png#1x2".to_owned(),
                    alt: "a b c d".to_owned(),
                    title: String::new(),
                }),
                Node::text(" after"),
            ])]
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            blocks("[site](https://example.com)\n"),
            vec![para(vec![Node::with_children(
                NodeKind::Link {
                    url: "https://example.com".to_owned()
                },
                vec![Node::text("site")]
            )])]
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            blocks("- a\n- b\n"),
            vec![Node::with_children(
                NodeKind::List { ordered: false },
                vec![
                    Node::with_children(NodeKind::ListItem, vec![Node::text("a")]),
                    Node::with_children(NodeKind::ListItem, vec![Node::text("b")]),
                ]
            )]
        );

        let ordered = blocks("1. a\n");
        assert_eq!(ordered[0].kind, NodeKind::List { ordered: true });
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            blocks("> quoted\n"),
            vec![Node::with_children(
                NodeKind::Blockquote,
                vec![para(vec![Node::text("quoted")])]
            )]
        );
    }

    #[test]
    fn test_html_block_joined() {
        assert_eq!(
            blocks("<div>\nhi\n</div>\n"),
            vec![Node::leaf(NodeKind::Html, "<div>\nhi\n</div>")]
        );
    }

    #[test]
    fn test_thematic_break() {
        assert_eq!(
            blocks("a\n\n***\n"),
            vec![
                para(vec![Node::text("a")]),
                Node::new(NodeKind::ThematicBreak)
            ]
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse("").unwrap(), Node::new(NodeKind::Root));
    }

    #[test]
    fn test_unsupported_constructs() {
        let mut builder = TreeBuilder::new();
        let err = builder.event(Event::TaskListMarker(true)).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedNodeKind("task list marker")));

        let err = builder.start(Tag::Strikethrough).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedNodeKind("strikethrough")));
    }

    #[test]
    fn test_unbalanced_stream() {
        let mut builder = TreeBuilder::new();
        builder.start(Tag::Paragraph).unwrap();
        let err = builder.finish().unwrap_err();
        assert!(matches!(
            err,
            RenderError::StructuralMismatch {
                found: "paragraph",
                ..
            }
        ));

        let err = TreeBuilder::new().end().unwrap_err();
        assert!(matches!(err, RenderError::StructuralMismatch { found: "root", .. }));
    }
}
