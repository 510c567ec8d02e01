//! Directory index tree.
//!
//! Documents are partitioned into a tree of [`IndexNode`]s, one per directory
//! level of their output URLs.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<IndexNode>` owned by the tree, with
//! parent/children relationships tracked by [`NodeId`] handles. This provides:
//! - Single ownership: dropping the tree frees every node at once
//! - O(1) node lookups by handle and by directory path
//! - Deterministic shape: children keep first-encounter order and documents
//!   keep input order; nothing is re-sorted

use std::collections::HashMap;

use crate::Document;
use crate::segment::{dir_segments, join};

/// Handle to a node inside an [`IndexTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, present in every tree.
    pub const ROOT: Self = Self(0);

    /// Position of the node in the tree's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One directory level of the document hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexNode<D> {
    name: String,
    path: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    documents: Vec<D>,
}

impl<D> IndexNode<D> {
    fn new(name: String, path: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            path,
            parent,
            children: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Path segment this node represents (empty for the root).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory path without leading slash (e.g. `"guide/setup"`, `""` for root).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in first-encounter order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Documents whose directory is exactly this node, in input order.
    #[must_use]
    pub fn documents(&self) -> &[D] {
        &self.documents
    }

    /// True for the root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Immutable directory tree of documents.
///
/// Built with [`IndexTreeBuilder`] or [`build_tree`]. Always contains at least
/// the root node.
#[derive(Clone, Debug)]
pub struct IndexTree<D> {
    nodes: Vec<IndexNode<D>>,
    path_index: HashMap<String, NodeId>,
}

impl<D> IndexTree<D> {
    /// The root node (empty name, empty path).
    #[must_use]
    pub fn root(&self) -> &IndexNode<D> {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Get a node by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &IndexNode<D> {
        &self.nodes[id.0]
    }

    /// Get a node by handle, `None` if it does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&IndexNode<D>> {
        self.nodes.get(id.0)
    }

    /// Look up a node by directory path.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory path without leading slash (e.g. `"guide/setup"`, `""` for root)
    #[must_use]
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.path_index.get(path).copied()
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in creation order.
    ///
    /// The root comes first and every node comes after its parent.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &IndexNode<D>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Children of a node with their handles.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &IndexNode<D>)> {
        self.nodes[id.0]
            .children
            .iter()
            .map(|&c| (c, &self.nodes[c.0]))
    }

    /// Every document in the tree, node by node in creation order.
    pub fn documents(&self) -> impl Iterator<Item = &D> {
        self.nodes.iter().flat_map(|n| n.documents.iter())
    }

    /// Total number of documents across all nodes.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.nodes.iter().map(|n| n.documents.len()).sum()
    }
}

/// Builder for constructing [`IndexTree`] instances.
#[derive(Debug)]
pub struct IndexTreeBuilder<D> {
    nodes: Vec<IndexNode<D>>,
}

impl<D> Default for IndexTreeBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> IndexTreeBuilder<D> {
    /// Create a builder holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![IndexNode::new(String::new(), String::new(), None)],
        }
    }

    /// Place a document under the directory of `url`.
    ///
    /// Missing directory nodes are created along the way. Returns the node the
    /// document was added to.
    pub fn insert(&mut self, document: D, url: &str) -> NodeId {
        let id = self.locate(url);
        self.nodes[id.0].documents.push(document);
        id
    }

    /// Find or create the node for the directory of `url`.
    ///
    /// Child lookup is an exact, case-sensitive name match; the first match
    /// wins. New children are appended after existing ones.
    pub fn locate(&mut self, url: &str) -> NodeId {
        let mut current = NodeId::ROOT;
        for segment in dir_segments(url) {
            current = match self.find_child(current, segment) {
                Some(child) => child,
                None => self.add_child(current, segment),
            };
        }
        current
    }

    /// Append a document to an existing node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this builder.
    pub fn push_document(&mut self, id: NodeId, document: D) {
        self.nodes[id.0].documents.push(document);
    }

    fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c.0].name == name)
    }

    fn add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let path = join(&self.nodes[parent.0].path, name);
        self.nodes
            .push(IndexNode::new(name.to_owned(), path, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Build the [`IndexTree`] instance.
    #[must_use]
    pub fn build(self) -> IndexTree<D> {
        let path_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.path.clone(), NodeId(i)))
            .collect();

        IndexTree {
            nodes: self.nodes,
            path_index,
        }
    }
}

/// Build a tree from documents, inserting them in collection order.
pub fn build_tree<D: Document>(documents: impl IntoIterator<Item = D>) -> IndexTree<D> {
    let mut builder = IndexTreeBuilder::new();
    for document in documents {
        let id = builder.locate(document.url());
        builder.push_document(id, document);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::segment;

    fn sample_urls() -> Vec<&'static str> {
        vec![
            "/index.html",
            "/guide/setup.html",
            "/api/v1/users.html",
            "/guide/faq.html",
            "/api/overview.html",
            "/guide/advanced/tuning.html",
            "/about.html",
            "/api/v1/orders.html",
        ]
    }

    fn child_names<D>(tree: &IndexTree<D>, id: NodeId) -> Vec<&str> {
        tree.children(id).map(|(_, n)| n.name()).collect()
    }

    #[test]
    fn test_new_builder_has_only_root() {
        let tree = IndexTreeBuilder::<String>::new().build();

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().name(), "");
        assert_eq!(tree.root().path(), "");
        assert!(tree.root().is_root());
        assert!(tree.root().children().is_empty());
    }

    #[test]
    fn test_top_level_document_goes_to_root() {
        let tree = build_tree(["/about.html", "/index.html"]);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().documents(), &["/about.html", "/index.html"]);
    }

    #[test]
    fn test_insert_creates_nested_nodes() {
        let mut builder = IndexTreeBuilder::new();
        let id = builder.insert("tuning", "/guide/advanced/tuning.html");
        let tree = builder.build();

        let node = tree.node(id);
        assert_eq!(node.name(), "advanced");
        assert_eq!(node.path(), "guide/advanced");
        assert_eq!(node.documents(), &["tuning"]);

        let guide = tree.find("guide").unwrap();
        assert_eq!(node.parent(), Some(guide));
        assert!(tree.node(guide).documents().is_empty());
    }

    #[test]
    fn test_insert_reuses_existing_child() {
        let mut builder = IndexTreeBuilder::new();
        let first = builder.insert("a", "/guide/a.html");
        let second = builder.insert("b", "/guide/b.html");
        let tree = builder.build();

        assert_eq!(first, second);
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.node(first).documents(), &["a", "b"]);
    }

    #[test]
    fn test_children_keep_first_encounter_order() {
        let tree = build_tree(sample_urls());

        assert_eq!(child_names(&tree, NodeId::ROOT), vec!["guide", "api"]);
        let api = tree.find("api").unwrap();
        assert_eq!(child_names(&tree, api), vec!["v1"]);
        let v1 = tree.find("api/v1").unwrap();
        assert_eq!(
            tree.node(v1).documents(),
            &["/api/v1/users.html", "/api/v1/orders.html"]
        );
    }

    #[test]
    fn test_child_lookup_is_case_sensitive() {
        let tree = build_tree(["/Guide/a.html", "/guide/b.html"]);

        assert_eq!(child_names(&tree, NodeId::ROOT), vec!["Guide", "guide"]);
    }

    #[test]
    fn test_directory_url_resolves_to_parent() {
        let tree = build_tree(["/guide/setup/"]);

        let guide = tree.find("guide").unwrap();
        assert_eq!(tree.node(guide).documents(), &["/guide/setup/"]);
        assert!(tree.find("guide/setup").is_none());
    }

    #[test]
    fn test_malformed_urls_are_absorbed() {
        let tree = build_tree(["", "/", "//", "page.html", "//guide//x.html"]);

        assert_eq!(tree.root().documents(), &["", "/", "//", "page.html"]);
        let guide = tree.find("guide").unwrap();
        assert_eq!(tree.node(guide).documents(), &["//guide//x.html"]);
    }

    #[test]
    fn test_every_document_is_kept_exactly_once() {
        let urls = sample_urls();
        let tree = build_tree(urls.clone());

        let mut recovered: Vec<&str> = tree.documents().copied().collect();
        let mut expected = urls;
        recovered.sort_unstable();
        expected.sort_unstable();

        assert_eq!(recovered, expected);
        assert_eq!(tree.document_count(), 8);
    }

    #[test]
    fn test_documents_land_on_their_directory() {
        let tree = build_tree(sample_urls());

        for (_, node) in tree.iter() {
            for url in node.documents() {
                assert_eq!(segment::dir_segments(url).join("/"), node.path());
            }
        }
    }

    #[test]
    fn test_node_path_joins_parent_path_and_name() {
        let tree = build_tree(sample_urls());

        assert_eq!(tree.root().path(), "");
        for (_, node) in tree.iter().skip(1) {
            let parent = tree.node(node.parent().unwrap());
            assert_eq!(node.path(), segment::join(parent.path(), node.name()));
        }
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let first = build_tree(sample_urls());
        let second = build_tree(sample_urls());

        assert_eq!(first.node_count(), second.node_count());
        for ((a_id, a), (b_id, b)) in first.iter().zip(second.iter()) {
            assert_eq!(a_id, b_id);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_children_have_unique_names() {
        let tree = build_tree(sample_urls());

        for (id, _) in tree.iter() {
            let mut names = child_names(&tree, id);
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total);
        }
    }

    #[test]
    fn test_find_by_path() {
        let tree = build_tree(sample_urls());

        assert_eq!(tree.find(""), Some(NodeId::ROOT));
        assert_eq!(tree.node(tree.find("api/v1").unwrap()).name(), "v1");
        assert!(tree.find("missing").is_none());
        assert!(tree.get(NodeId(999)).is_none());
    }

    #[test]
    fn test_iter_visits_parents_before_children() {
        let tree = build_tree(sample_urls());

        for (id, node) in tree.iter() {
            if let Some(parent) = node.parent() {
                assert!(parent < id);
            }
        }
    }
}
