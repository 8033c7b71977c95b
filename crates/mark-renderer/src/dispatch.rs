//! Stack-based bottom-up rendering.
//!
//! [`render`] walks the tree in post-order. Entering a node pushes a
//! [`Frame::Pending`] marker; leaving it folds every finished child frame above
//! that marker into one string, asks the [`NodeRules`] for the node's markup
//! and pushes the result as [`Frame::Full`]. When the walk ends exactly one
//! full frame is left: the rendered document body.
//!
//! Adjacent inline frames are merged while folding, so runs of text,
//! emphasis and inline code stay one unbroken string.

use crate::error::RenderError;
use crate::node::{Node, NodeKind};

/// Rule applied to paragraphs whose container already provides a block wrapper.
static TEXT: NodeKind = NodeKind::Text;

/// Per-kind markup rules used by the dispatcher.
pub trait NodeRules {
    /// Render one node given its kind and its content.
    ///
    /// `content` is the literal value for leaves and the joined, trimmed
    /// markup of the children otherwise.
    fn render_node(&mut self, kind: &NodeKind, content: &str) -> Result<String, RenderError>;
}

/// Working-stack entry of the dispatcher.
#[derive(Debug, PartialEq, Eq)]
pub enum Frame<'a> {
    /// A node that has been entered but not yet closed.
    Pending(&'a NodeKind),
    /// A closed node, folded into its markup.
    Full { value: String, inline: bool },
}

impl Frame<'_> {
    fn name(&self) -> &'static str {
        match self {
            Frame::Pending(kind) => kind.name(),
            Frame::Full { .. } => "rendered node",
        }
    }
}

/// Post-order render state machine.
#[derive(Debug, Default)]
pub struct Dispatcher<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Current working stack, bottom first.
    #[must_use]
    pub fn frames(&self) -> &[Frame<'a>] {
        &self.stack
    }

    /// Start a node.
    pub fn enter(&mut self, node: &'a Node) {
        self.stack.push(Frame::Pending(&node.kind));
    }

    /// Close a node whose children (if any) have all been closed.
    pub fn leave<R: NodeRules + ?Sized>(
        &mut self,
        node: &'a Node,
        rules: &mut R,
    ) -> Result<(), RenderError> {
        if node.children.is_empty() {
            self.pop_pending(&node.kind)?;
            let content = node.value.as_deref().unwrap_or_default();
            let value = rules.render_node(&node.kind, content)?;
            self.stack.push(Frame::Full {
                value,
                inline: node.kind.is_inline(),
            });
            return Ok(());
        }

        // Children come off the stack last-first; merged runs are kept in
        // that reversed order until the final join.
        let mut children: Vec<(String, bool)> = Vec::new();
        while let Some((value, inline)) = self.pop_full() {
            match children.last_mut() {
                Some((next, true)) if inline => next.insert_str(0, &value),
                _ => children.push((value, inline)),
            }
        }

        self.pop_pending(&node.kind)?;

        let joined: String = children.iter().rev().map(|(value, _)| value.as_str()).collect();
        let kind = self.effective_kind(&node.kind);
        let value = rules.render_node(kind, joined.trim())?;
        self.stack.push(Frame::Full {
            value,
            inline: kind.is_inline(),
        });
        Ok(())
    }

    /// Finish the walk and return the rendered document.
    pub fn finish(mut self) -> Result<String, RenderError> {
        let mismatch = |found| RenderError::StructuralMismatch {
            expected: "rendered document",
            found,
        };

        if self.stack.len() > 1 {
            let found = self
                .stack
                .iter()
                .rev()
                .find(|frame| matches!(frame, Frame::Pending(_)))
                .map_or("rendered node", Frame::name);
            return Err(mismatch(found));
        }

        match self.stack.pop() {
            Some(Frame::Full { value, .. }) => Ok(value),
            Some(frame) => Err(mismatch(frame.name())),
            None => Err(mismatch("empty stack")),
        }
    }

    /// Pop the top frame if it is finished.
    fn pop_full(&mut self) -> Option<(String, bool)> {
        match self.stack.pop_if(|frame| matches!(frame, Frame::Full { .. }))? {
            Frame::Full { value, inline } => Some((value, inline)),
            Frame::Pending(_) => None,
        }
    }

    /// Pop the pending frame of the node being closed.
    fn pop_pending(&mut self, kind: &NodeKind) -> Result<(), RenderError> {
        match self.stack.pop() {
            Some(Frame::Pending(top)) if top.same_variant(kind) => Ok(()),
            Some(frame) => Err(RenderError::StructuralMismatch {
                expected: kind.name(),
                found: frame.name(),
            }),
            None => Err(RenderError::StructuralMismatch {
                expected: kind.name(),
                found: "empty stack",
            }),
        }
    }

    /// Kind whose rule renders the node, after unwrapping nested paragraphs.
    ///
    /// Only a paragraph opening its container is unwrapped: the frame right
    /// below it must be the container's pending frame. Later paragraphs sit
    /// on a finished sibling and keep their own markup.
    fn effective_kind<'k>(&self, kind: &'k NodeKind) -> &'k NodeKind {
        if !matches!(kind, NodeKind::Paragraph) {
            return kind;
        }
        match self.stack.last() {
            Some(Frame::Pending(NodeKind::ListItem | NodeKind::Blockquote)) => &TEXT,
            _ => kind,
        }
    }
}

/// Work item of the iterative traversal.
enum Step<'a> {
    Enter(&'a Node),
    Leave(&'a Node),
}

/// Render a whole tree bottom-up.
pub fn render<R: NodeRules + ?Sized>(tree: &Node, rules: &mut R) -> Result<String, RenderError> {
    let mut dispatcher = Dispatcher::new();
    let mut steps = vec![Step::Enter(tree)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(node) => {
                dispatcher.enter(node);
                steps.push(Step::Leave(node));
                steps.extend(node.children.iter().rev().map(Step::Enter));
            }
            Step::Leave(node) => dispatcher.leave(node, rules)?,
        }
    }

    dispatcher.finish()
}
