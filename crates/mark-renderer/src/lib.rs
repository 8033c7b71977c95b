//! Sectioning and dual-format rendering for blog entries.
//!
//! This crate turns a markdown entry into two pages sharing one document tree:
//! a canonical HTML page and its AMP counterpart.
//!
//! # Architecture
//!
//! The pipeline runs in four steps:
//! - [`parse`]: folds `pulldown-cmark` events into a [`Node`] tree
//! - [`sectionize_root`]: regroups the flat block sequence into nested
//!   `Article` / `Section` wrappers keyed by heading depth
//! - [`dispatch::render`]: a stack-based post-order walk that renders every node
//!   through a [`Renderer`] and merges adjacent inline siblings
//! - [`Renderer::finalize`]: substitutes the body into the page template and
//!   puts extracted code blocks back in place
//!
//! Format-specific differences (stylesheet links, images, iframes) are
//! delegated to the [`RenderBackend`] trait, implemented by [`StandardBackend`]
//! and [`AmpBackend`].
//!
//! # Example
//!
//! ```
//! use mark_renderer::{
//!     AmpBackend, DocumentTemplate, PageContext, StandardBackend, parse, render_document,
//!     sectionize_root,
//! };
//!
//! let mut root = parse("# Title\n\n## Intro\n\nHello\n").unwrap();
//! sectionize_root(&mut root);
//!
//! let page = PageContext::default();
//! let template = DocumentTemplate::new("{{ body }}", "");
//! let html = render_document::<StandardBackend>(&root, &page, &template).unwrap();
//! let amp = render_document::<AmpBackend>(&root, &page, &template).unwrap();
//! assert!(html.contains("<section>"));
//! assert!(amp.contains("<section>"));
//! ```

mod amp;
mod backend;
mod code_store;
pub mod dispatch;
mod error;
mod node;
mod renderer;
mod sections;
mod standard;
mod template;
mod tree;
mod util;

pub use amp::AmpBackend;
pub use backend::{RenderBackend, Stylesheets, Variant};
pub use code_store::{CodeStore, PLACEHOLDER_PREFIX, placeholder};
pub use dispatch::{Frame, NodeRules};
pub use error::RenderError;
pub use node::{Node, NodeKind};
pub use renderer::{PageContext, Renderer, render_document};
pub use sections::{flatten_headings, sectionize, sectionize_root};
pub use standard::StandardBackend;
pub use template::DocumentTemplate;
pub use tree::parse;
pub use util::{escape_html, unspace};
