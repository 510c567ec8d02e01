//! Index page writer.
//!
//! [`SiteWriter`] is the [`IndexSink`] used by the CLI. For every artifact it
//! renders the `index` template, writes the result, and records the page:
//!
//! ```text
//! artifact "guide/setup"  ->  <output_dir>/guide/setup/index.html  (url /guide/setup/)
//! artifact ""             ->  <output_dir>/index.html              (url /)
//! ```
//!
//! # Template context
//!
//! | Name | Content |
//! |---|---|
//! | `title` | directory name (empty for root) |
//! | `display_title` | humanized name, or the home title for root |
//! | `path` | directory path without leading slash |
//! | `url` | URL of the index page |
//! | `pages` | documents in the directory: `url`, `title` |
//! | `children` | subdirectory index pages: `title`, `display_title`, `url`, `pages` |
//! | `breadcrumb` | trail from the root to this directory: `label`, `href` |
//!
//! Directories named `.` or `..` are not written, so a page never lands
//! outside its own directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use wikidex_index::title::humanize_file_name;
use wikidex_index::{
    Breadcrumb, BreadcrumbBuilder, Document, INDEX_TEMPLATE, IndexArtifact, IndexSink,
};

use crate::template::{RenderError, TemplateSet};

/// Output file name of every index page.
const INDEX_FILE: &str = "index.html";

/// An index page written by [`SiteWriter`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedPage {
    /// Written file.
    pub path: PathBuf,
    /// URL the page is served at.
    pub url: String,
    /// Display title.
    pub title: String,
}

#[derive(Serialize)]
struct IndexContext<'a> {
    title: &'a str,
    display_title: String,
    path: &'a str,
    url: String,
    pages: Vec<PageLink>,
    children: Vec<ChildLink<'a>>,
    breadcrumb: Breadcrumb,
}

#[derive(Serialize)]
struct PageLink {
    url: String,
    title: String,
}

#[derive(Serialize)]
struct ChildLink<'a> {
    title: &'a str,
    display_title: String,
    url: String,
    pages: usize,
}

/// Renders index artifacts and writes them below an output directory.
#[derive(Debug)]
pub struct SiteWriter<'a> {
    templates: &'a TemplateSet,
    output_dir: PathBuf,
    site_root: String,
    home_title: String,
    breadcrumbs: BreadcrumbBuilder,
    pages: Vec<GeneratedPage>,
}

impl<'a> SiteWriter<'a> {
    /// Create a writer rendering with `templates` into `output_dir`.
    #[must_use]
    pub fn new(templates: &'a TemplateSet, output_dir: PathBuf) -> Self {
        Self {
            templates,
            output_dir,
            site_root: "/".to_owned(),
            home_title: "Home".to_owned(),
            breadcrumbs: BreadcrumbBuilder::default(),
            pages: Vec::new(),
        }
    }

    /// Set the URL prefix of generated links (e.g. `/docs/`).
    #[must_use]
    pub fn with_site_root(mut self, site_root: impl Into<String>) -> Self {
        let mut site_root = site_root.into();
        if !site_root.ends_with('/') {
            site_root.push('/');
        }
        self.site_root = site_root;
        self
    }

    /// Set the display title of the root index page.
    #[must_use]
    pub fn with_home_title(mut self, home_title: impl Into<String>) -> Self {
        self.home_title = home_title.into();
        self
    }

    /// Set the builder used for the `breadcrumb` context value.
    #[must_use]
    pub fn with_breadcrumbs(mut self, breadcrumbs: BreadcrumbBuilder) -> Self {
        self.breadcrumbs = breadcrumbs;
        self
    }

    /// Pages written so far, in write order.
    #[must_use]
    pub fn pages(&self) -> &[GeneratedPage] {
        &self.pages
    }

    /// Consume the writer and return the written pages.
    #[must_use]
    pub fn into_pages(self) -> Vec<GeneratedPage> {
        self.pages
    }

    /// URL of the index page for a directory path.
    fn index_url(&self, path: &str) -> String {
        if path.is_empty() {
            self.site_root.clone()
        } else {
            format!("{}{path}/", self.site_root)
        }
    }

    /// URL of a document, rebased onto the site root.
    fn document_url(&self, url: &str) -> String {
        format!("{}{}", self.site_root, url.trim_start_matches('/'))
    }

    fn context<'t, D: Document>(&self, artifact: &'t IndexArtifact<'_, D>) -> IndexContext<'t> {
        let pages = artifact
            .documents()
            .iter()
            .map(|doc| {
                let title = doc.title().map_or_else(
                    || humanize_file_name(doc.url().rsplit('/').next().unwrap_or_default()),
                    ToOwned::to_owned,
                );
                PageLink {
                    url: self.document_url(doc.url()),
                    title,
                }
            })
            .collect();

        let children = artifact
            .children()
            .iter()
            .map(|child| ChildLink {
                title: child.title(),
                display_title: child.display_title(&self.home_title),
                url: self.index_url(child.path()),
                pages: child.documents().len(),
            })
            .collect();

        IndexContext {
            title: artifact.title(),
            display_title: artifact.display_title(&self.home_title),
            path: artifact.path(),
            url: self.index_url(artifact.path()),
            pages,
            children,
            breadcrumb: self
                .breadcrumbs
                .build(&format!("/{}/{INDEX_FILE}", artifact.path())),
        }
    }

    fn write(&self, file: &Path, html: &str) -> Result<(), RenderError> {
        if let Some(dir) = file.parent() {
            fs::create_dir_all(dir).map_err(|source| RenderError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(file, html).map_err(|source| RenderError::Io {
            path: file.to_path_buf(),
            source,
        })
    }
}

/// True if a directory path has `.` or `..` segments.
///
/// Such nodes come from URLs like `/a/../x.html`; writing them would land on
/// another directory's index page.
fn escapes_directory(path: &str) -> bool {
    path.split('/').any(|segment| segment == "." || segment == "..")
}

impl<D: Document> IndexSink<D> for SiteWriter<'_> {
    type Error = RenderError;

    fn emit(&mut self, artifact: &IndexArtifact<'_, D>) -> Result<(), Self::Error> {
        if escapes_directory(artifact.path()) {
            tracing::warn!(
                path = artifact.path(),
                "Skipping index page with relative path segment"
            );
            return Ok(());
        }

        let context = self.context(artifact);
        let html = self.templates.render(INDEX_TEMPLATE, &context)?;

        let file = self.output_dir.join(artifact.path()).join(INDEX_FILE);
        self.write(&file, &html)?;
        tracing::debug!(path = %file.display(), url = %context.url, "Index page written");

        self.pages.push(GeneratedPage {
            path: file,
            url: context.url,
            title: context.display_title,
        });
        Ok(())
    }
}
