//! Materialized recipe trees.
//!
//! A [`RecipeTree`] is the finite, ordered expansion of one root item's
//! recipe over an [`ItemIndex`](crate::catalog::ItemIndex). It is stored as
//! an arena: nodes live in a `Vec` in preorder (root at index 0) and refer to
//! their children by index. Trees are immutable once built; building again
//! produces a fresh arena.
//!
//! # Node ids
//!
//! Every node gets a [`NodeId`] derived from its kind, its item and its
//! position path from the root (`r`, `r.0`, `r.0.2`, ...):
//!
//! | kind | format | example |
//! |------|--------|---------|
//! | item | `<item id>@<path>` | `1@r.0` |
//! | duplicate | `dup:<item id>@<path>` | `dup:a@r.0.0` |
//! | missing | `missing@<path>` | `missing@r.2` |
//!
//! Ids are a pure function of the data, so completion state keyed by node id
//! survives rebuilding the same tree.

pub mod builder;

pub use builder::TreeBuilder;

use crate::catalog::ItemId;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Identifier of a node, unique within one tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a raw id string, e.g. one read back from persisted state.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn item(item: &ItemId, path: &str) -> Self {
        Self(format!("{item}@{path}"))
    }

    pub(crate) fn duplicate(item: &ItemId, path: &str) -> Self {
        Self(format!("dup:{item}@{path}"))
    }

    pub(crate) fn missing(path: &str) -> Self {
        Self(format!("missing@{path}"))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A resolved item, expanded if it has a recipe.
    Item,
    /// An item already expanded on this node's own ancestor path.
    Duplicate,
    /// An ingredient name with no matching item.
    Missing,
}

/// One node of a [`RecipeTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeNode {
    id: NodeId,
    kind: NodeKind,
    source_item_id: Option<ItemId>,
    display_name: String,
    image: Option<String>,
    children: Vec<usize>,
    parent: Option<usize>,
    depth: usize,
}

impl RecipeNode {
    pub(crate) fn new(
        id: NodeId,
        kind: NodeKind,
        source_item_id: Option<ItemId>,
        display_name: impl Into<String>,
        image: Option<String>,
        parent: Option<usize>,
        depth: usize,
    ) -> Self {
        Self {
            id,
            kind,
            source_item_id,
            display_name: display_name.into(),
            image,
            children: Vec::new(),
            parent,
            depth,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Item this node stands for; `None` for a missing placeholder.
    pub fn source_item_id(&self) -> Option<&ItemId> {
        self.source_item_id.as_ref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Arena indices of the children, in ingredient order.
    pub fn child_indices(&self) -> &[usize] {
        &self.children
    }

    /// Arena index of the parent; `None` for the root.
    pub const fn parent_index(&self) -> Option<usize> {
        self.parent
    }

    /// Distance from the root (the root is at depth 0).
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// True when the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True for duplicate and missing placeholders.
    pub fn is_placeholder(&self) -> bool {
        self.kind != NodeKind::Item
    }
}

/// Arena of [`RecipeNode`]s for one root item.
#[derive(Debug, Clone)]
pub struct RecipeTree {
    root_item: ItemId,
    nodes: Vec<RecipeNode>,
    by_id: HashMap<NodeId, usize>,
}

impl RecipeTree {
    /// Assemble a tree from a preorder arena. `nodes` must be non-empty.
    pub(crate) fn from_arena(root_item: ItemId, nodes: Vec<RecipeNode>) -> Self {
        let by_id = nodes.iter().enumerate().map(|(idx, node)| (node.id.clone(), idx)).collect();
        Self {
            root_item,
            nodes,
            by_id,
        }
    }

    /// Id of the item the tree was built for.
    pub fn root_item(&self) -> &ItemId {
        &self.root_item
    }

    /// The root node.
    pub fn root(&self) -> &RecipeNode {
        &self.nodes[0]
    }

    /// Node at an arena index.
    pub fn node(&self, index: usize) -> Option<&RecipeNode> {
        self.nodes.get(index)
    }

    /// Node by id.
    pub fn get(&self, id: &NodeId) -> Option<&RecipeNode> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    /// Arena index of a node id.
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Direct children of `node`, in ingredient order.
    pub fn children<'t>(&'t self, node: &'t RecipeNode) -> impl Iterator<Item = &'t RecipeNode> {
        node.children.iter().map(move |&idx| &self.nodes[idx])
    }

    /// Parent of `node`, `None` for the root.
    pub fn parent(&self, node: &RecipeNode) -> Option<&RecipeNode> {
        node.parent.map(|idx| &self.nodes[idx])
    }

    /// All nodes in preorder.
    pub fn iter(&self) -> impl Iterator<Item = &RecipeNode> {
        self.nodes.iter()
    }

    /// Number of nodes, placeholders included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built tree; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaves in preorder.
    pub fn leaves(&self) -> impl Iterator<Item = &RecipeNode> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    /// Ids of nodes whose display name contains `query`, ignoring case.
    ///
    /// This is a highlight pass: the tree itself is never filtered. A blank
    /// query highlights nothing.
    pub fn highlighted(&self, query: &str) -> Vec<&NodeId> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.nodes
            .iter()
            .filter(|node| node.display_name.to_lowercase().contains(&needle))
            .map(|node| &node.id)
            .collect()
    }
}
