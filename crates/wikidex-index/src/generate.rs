//! Index artifact generation.
//!
//! Walks an [`IndexTree`] in post-order and produces one [`IndexArtifact`] per
//! node. A node's artifact links to the artifacts of all its children, so
//! children are always finished before their parent:
//!
//! ```text
//! root            emitted 4th, children = [guide, api]
//! +-- guide       emitted 2nd, children = [advanced]
//! |   +-- advanced emitted 1st
//! +-- api         emitted 3rd
//! ```
//!
//! Artifacts are kept in a separate [`Artifacts`] map keyed by [`NodeId`]; the
//! tree itself is never mutated.

use std::rc::Rc;
use std::time::Instant;

use crate::Document;
use crate::title::humanize;
use crate::tree::{IndexTree, NodeId, build_tree};

/// Name of the template that must exist for index generation to run.
pub const INDEX_TEMPLATE: &str = "index";

/// Renderable index page for one directory.
#[derive(Debug)]
pub struct IndexArtifact<'t, D> {
    node: NodeId,
    title: &'t str,
    path: &'t str,
    documents: &'t [D],
    children: Vec<Rc<IndexArtifact<'t, D>>>,
}

impl<'t, D> IndexArtifact<'t, D> {
    /// Node this artifact was generated for.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Raw title: the directory name (empty for the root).
    #[must_use]
    pub fn title(&self) -> &'t str {
        self.title
    }

    /// Human-friendly title, using `home_title` for the root directory.
    #[must_use]
    pub fn display_title(&self, home_title: &str) -> String {
        if self.path.is_empty() {
            home_title.to_owned()
        } else {
            humanize(self.title)
        }
    }

    /// Directory path without leading slash (`""` for the root).
    #[must_use]
    pub fn path(&self) -> &'t str {
        self.path
    }

    /// Documents directly inside this directory.
    #[must_use]
    pub fn documents(&self) -> &'t [D] {
        self.documents
    }

    /// Artifacts of the child directories, in child order.
    #[must_use]
    pub fn children(&self) -> &[Rc<IndexArtifact<'t, D>>] {
        &self.children
    }

    /// True if this is the artifact of the root directory.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.node == NodeId::ROOT
    }
}

/// Generated artifacts keyed by node.
#[derive(Debug)]
pub struct Artifacts<'t, D> {
    slots: Vec<Option<Rc<IndexArtifact<'t, D>>>>,
    order: Vec<NodeId>,
}

impl<'t, D> Artifacts<'t, D> {
    /// Artifact of a node, `None` if it was not generated.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&IndexArtifact<'t, D>> {
        self.slots.get(id.index())?.as_deref()
    }

    /// Artifact of the root directory.
    #[must_use]
    pub fn root(&self) -> Option<&IndexArtifact<'t, D>> {
        self.get(NodeId::ROOT)
    }

    /// Nodes in the order their artifacts were constructed.
    #[must_use]
    pub fn construction_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Number of generated artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Artifacts in construction order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexArtifact<'t, D>> {
        self.order.iter().filter_map(|&id| self.get(id))
    }
}

/// Lookup of available templates in the host pipeline.
pub trait TemplateCatalog {
    /// True if a template with this name can be rendered.
    fn has_template(&self, name: &str) -> bool;
}

/// Receiver for finished index artifacts.
///
/// The host renders, writes, and registers each artifact here. Artifacts
/// arrive children-first, so a sink never sees a parent before its children.
pub trait IndexSink<D> {
    /// Error raised by rendering or writing.
    type Error;

    /// Handle one finished artifact.
    fn emit(&mut self, artifact: &IndexArtifact<'_, D>) -> Result<(), Self::Error>;
}

/// Generate index artifacts for every node of `tree`.
///
/// Traversal is post-order, children left to right. Each artifact is handed
/// to `sink` as soon as it is built, before its parent is started.
///
/// # Errors
///
/// Returns the first error raised by `sink`. Generation stops there; nothing
/// is retried.
pub fn generate<'t, D, S>(
    tree: &'t IndexTree<D>,
    sink: &mut S,
) -> Result<Artifacts<'t, D>, S::Error>
where
    S: IndexSink<D> + ?Sized,
{
    let mut slots = vec![None; tree.node_count()];
    let mut order = Vec::with_capacity(tree.node_count());

    // Finished artifacts whose parent is not built yet. Children of a node are
    // always the topmost entries when the node itself is finished.
    let mut finished: Vec<Rc<IndexArtifact<'t, D>>> = Vec::new();
    let mut stack = vec![(NodeId::ROOT, false)];

    while let Some((id, expanded)) = stack.pop() {
        let node = tree.node(id);
        if !expanded {
            stack.push((id, true));
            stack.extend(node.children().iter().rev().map(|&child| (child, false)));
            continue;
        }

        let children = finished.split_off(finished.len() - node.children().len());
        let artifact = Rc::new(IndexArtifact {
            node: id,
            title: node.name(),
            path: node.path(),
            documents: node.documents(),
            children,
        });

        sink.emit(&artifact)?;
        tracing::debug!(
            path = artifact.path,
            documents = artifact.documents.len(),
            children = artifact.children.len(),
            "Index artifact emitted"
        );

        slots[id.index()] = Some(Rc::clone(&artifact));
        order.push(id);
        finished.push(artifact);
    }

    Ok(Artifacts { slots, order })
}

/// Counts reported by [`generate_index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexSummary {
    /// Documents placed in the tree.
    pub documents: usize,
    /// Index pages generated (one per directory node).
    pub pages: usize,
}

/// Build the index tree for `documents` and generate its pages.
///
/// Nothing happens unless `templates` has the [`INDEX_TEMPLATE`]: no tree is
/// built, no artifact is produced, and `sink` is never called. Returns `None`
/// in that case.
///
/// # Errors
///
/// Returns the first error raised by `sink`.
pub fn generate_index<D, T, S>(
    documents: impl IntoIterator<Item = D>,
    templates: &T,
    sink: &mut S,
) -> Result<Option<IndexSummary>, S::Error>
where
    D: Document,
    T: TemplateCatalog + ?Sized,
    S: IndexSink<D> + ?Sized,
{
    if !templates.has_template(INDEX_TEMPLATE) {
        tracing::info!(
            template = INDEX_TEMPLATE,
            "Index template not available, skipping index generation"
        );
        return Ok(None);
    }

    let start = Instant::now();
    let tree = build_tree(documents);
    let artifacts = generate(&tree, sink)?;

    let summary = IndexSummary {
        documents: tree.document_count(),
        pages: artifacts.len(),
    };
    tracing::info!(
        documents = summary.documents,
        pages = summary.pages,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Index generated"
    );

    Ok(Some(summary))
}
