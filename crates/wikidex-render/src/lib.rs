//! Index page rendering and writing for wikidex.
//!
//! Provides the host-side collaborators of index generation:
//! - [`TemplateSet`]: minijinja templates loaded from a directory, answering
//!   whether the `index` layout exists
//! - [`SiteWriter`]: renders each index artifact with the `index` layout,
//!   writes it to `<output_dir>/<path>/index.html`, and records a
//!   [`GeneratedPage`] for downstream steps

mod template;
mod writer;

pub use template::{RenderError, TemplateSet};
pub use writer::{GeneratedPage, SiteWriter};
