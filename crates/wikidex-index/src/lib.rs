//! Directory index tree and breadcrumb trails for wikidex.
//!
//! This crate provides:
//! - [`IndexTree`]: documents partitioned into a directory-shaped tree keyed by URL segments
//! - [`generate`]: post-order generation of one [`IndexArtifact`] per tree node
//! - [`breadcrumb`]: Home-to-parent-directory navigation trails for any path
//!
//! Rendering and writing are not done here. Hosts plug them in through the
//! [`TemplateCatalog`] and [`IndexSink`] traits.
//!
//! # Quick Start
//!
//! ```
//! use wikidex_index::{breadcrumb, build_tree};
//!
//! let tree = build_tree(["/guide/setup.html", "/guide/faq.html", "/about.html"]);
//! assert_eq!(tree.root().documents(), &["/about.html"]);
//!
//! let trail = breadcrumb("/guide/setup.html");
//! assert_eq!(trail.to_string(), "Home (/) > guide (/guide/)");
//! ```

mod breadcrumb;
mod generate;
pub mod segment;
pub mod title;
mod tree;

pub use breadcrumb::{Breadcrumb, BreadcrumbBuilder, BreadcrumbItem, breadcrumb, escape_html};
pub use generate::{
    Artifacts, INDEX_TEMPLATE, IndexArtifact, IndexSink, IndexSummary, TemplateCatalog, generate,
    generate_index,
};
pub use tree::{IndexNode, IndexTree, IndexTreeBuilder, NodeId, build_tree};

/// A built document that can be placed in the index.
///
/// Only the output URL is used for placement; everything else about the
/// document is opaque to the index.
pub trait Document {
    /// Output URL of the document (e.g. `/guide/setup.html`).
    fn url(&self) -> &str;

    /// Display title, if the document has one.
    fn title(&self) -> Option<&str> {
        None
    }
}

impl Document for str {
    fn url(&self) -> &str {
        self
    }
}

impl Document for String {
    fn url(&self) -> &str {
        self
    }
}

impl<T: Document + ?Sized> Document for &T {
    fn url(&self) -> &str {
        (**self).url()
    }

    fn title(&self) -> Option<&str> {
        (**self).title()
    }
}
