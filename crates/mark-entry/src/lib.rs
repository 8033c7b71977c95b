//! Blog entry pipeline.
//!
//! Reads an entry source (`<site root>/entries/<date>/<name>.md`), splits off
//! its tag line, summarizes its Intro and renders the canonical and AMP pages
//! through [`mark_renderer`]. [`write_archive`] lists every entry on the site
//! index page, and [`build_site`] rebuilds every entry followed by that index.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use mark_config::Config;
//! use mark_entry::EntryBuilder;
//!
//! let config = Config::load(None, None).unwrap();
//! let output = EntryBuilder::new(&config)
//!     .build(Path::new("blog.jxck.io/entries/2016-01-07/http2.md"))
//!     .unwrap();
//! println!("{}", output.paths.canonical);
//! ```

mod archive;
mod builder;
pub mod description;
mod error;
mod front;
mod paths;
mod site;

pub use archive::{ArchiveEntry, ArchiveOutput, find_entries, render_archive, write_archive};
pub use builder::{EntryBuilder, EntryOutput};
pub use error::EntryError;
pub use front::{TagLine, parse_tag_line};
pub use paths::EntryPaths;
pub use site::{SiteOutput, build_site, remove_stale_pages};
