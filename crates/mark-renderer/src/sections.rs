//! Heading-driven sectioning.
//!
//! The tokenizer yields headings as siblings of the content that follows them.
//! [`sectionize`] regroups such a flat sequence into nested wrappers so that
//! each heading and its content end up inside one `<section>`:
//!
//! ```text
//! h1 p h2 p h3 p h2 p        Article
//!                             ├─ h1 p
//!                             ├─ Section ─ h2 p ─ Section ─ h3 p
//!                             └─ Section ─ h2 p
//! ```
//!
//! Wrappers are only created for depths that actually occur: a jump from
//! `h1` straight to `h3` yields one nested wrapper, not two.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::node::{Node, NodeKind};

/// Regroup a flat sequence of block nodes into nested section wrappers.
///
/// The first wrapper at depth 1 is an `Article`; every other wrapper is a
/// `Section`. At least one wrapper is always returned, so content preceding
/// the first heading (or a document without headings) lands in it.
#[must_use]
pub fn sectionize(children: Vec<Node>, base_depth: u8) -> Vec<Node> {
    let mut remaining: VecDeque<Node> = children.into();
    let mut sections = sectionize_at(&mut remaining, base_depth);

    // A heading shallower than `base_depth` ends the scan early; keep going
    // from its depth so nothing is dropped.
    while let Some(depth) = remaining.front().and_then(Node::heading_depth) {
        sections.extend(sectionize_at(&mut remaining, depth));
    }

    sections
}

/// Replace the children of `root` with their sectioned form.
pub fn sectionize_root(root: &mut Node) {
    let children = std::mem::take(&mut root.children);
    root.children = sectionize(children, 1);
    tracing::debug!(sections = root.children.len(), "Sectioned document");
}

/// Heading depths in depth-first order.
///
/// Sectioning only moves nodes under wrappers, so this yields the same
/// sequence before and after [`sectionize`].
#[must_use]
pub fn flatten_headings(node: &Node) -> Vec<u8> {
    let mut depths = Vec::new();
    collect_headings(node, &mut depths);
    depths
}

fn collect_headings(node: &Node, depths: &mut Vec<u8>) {
    if let Some(depth) = node.heading_depth() {
        depths.push(depth);
    }
    for child in &node.children {
        collect_headings(child, depths);
    }
}

/// Consume `remaining` from the front, building the wrappers at `depth`.
///
/// Returns when the input is exhausted or when a heading shallower than
/// `depth` is reached; that heading is left at the front of `remaining`.
fn sectionize_at(remaining: &mut VecDeque<Node>, depth: u8) -> Vec<Node> {
    let mut sections = Vec::new();
    let mut current = Node::new(wrapper_kind(depth));

    while let Some(child) = remaining.pop_front() {
        if let Some(child_depth) = child.heading_depth() {
            match child_depth.cmp(&depth) {
                Ordering::Greater => {
                    remaining.push_front(child);
                    let nested = sectionize_at(remaining, child_depth);
                    current.children.extend(nested);
                    continue;
                }
                Ordering::Equal => {
                    // The heading that opened this level lands in the still-empty wrapper.
                    if !current.children.is_empty() {
                        let finished = std::mem::replace(&mut current, Node::new(NodeKind::Section));
                        sections.push(finished);
                    }
                }
                Ordering::Less => {
                    remaining.push_front(child);
                    break;
                }
            }
        }
        current.children.push(child);
    }

    sections.push(current);
    sections
}

fn wrapper_kind(depth: u8) -> NodeKind {
    if depth == 1 {
        NodeKind::Article
    } else {
        NodeKind::Section
    }
}
