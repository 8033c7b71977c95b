//! Document tree shared by the sectioner and the render dispatcher.

/// Kind of a document node, with the fields specific to that kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Whole document.
    Root,
    /// Top-level wrapper created by the sectioner for depth 1.
    Article,
    /// Nested wrapper created by the sectioner for depth 2 and deeper.
    Section,
    /// Heading of the given depth (1-6).
    Heading { depth: u8 },
    Paragraph,
    List { ordered: bool },
    ListItem,
    Blockquote,
    /// Code block. `lang` is the raw fence info (may carry `lang:file`).
    Code { lang: Option<String> },
    InlineCode,
    Link { url: String },
    Image { url: String, alt: String, title: String },
    Strong,
    Emphasis,
    /// Raw markup passed through unchanged.
    Html,
    Text,
    ThematicBreak,
}

impl NodeKind {
    /// Stable lower-case name, used in errors and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Article => "article",
            Self::Section => "section",
            Self::Heading { .. } => "heading",
            Self::Paragraph => "paragraph",
            Self::List { .. } => "list",
            Self::ListItem => "list item",
            Self::Blockquote => "blockquote",
            Self::Code { .. } => "code",
            Self::InlineCode => "inline code",
            Self::Link { .. } => "link",
            Self::Image { .. } => "image",
            Self::Strong => "strong",
            Self::Emphasis => "emphasis",
            Self::Html => "html",
            Self::Text => "text",
            Self::ThematicBreak => "thematic break",
        }
    }

    /// Whether rendered output of this kind joins its inline neighbours
    /// without a line break.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Strong
                | Self::Emphasis
                | Self::InlineCode
                | Self::Link { .. }
                | Self::Paragraph
        )
    }

    /// Whether two kinds are the same variant, ignoring their fields.
    #[must_use]
    pub fn same_variant(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A node of the document tree.
///
/// A parent exclusively owns its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Literal value for leaves (text, code body, raw markup).
    pub value: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node without value or children.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            value: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf node carrying a literal value.
    #[must_use]
    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// Create a node with the given children.
    #[must_use]
    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            value: None,
            children,
        }
    }

    /// Shorthand for a text leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Text, value)
    }

    /// Shorthand for a heading with a single text child.
    #[must_use]
    pub fn heading(depth: u8, text: impl Into<String>) -> Self {
        Self::with_children(NodeKind::Heading { depth }, vec![Self::text(text)])
    }

    /// Heading depth, if this node is a heading.
    #[must_use]
    pub fn heading_depth(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { depth } => Some(depth),
            _ => None,
        }
    }
}
