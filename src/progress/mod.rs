//! Completion tracking over a recipe tree.
//!
//! A [`CompletionStore`] is the set of completed [`NodeId`]s for one root
//! item, mirrored to a [`StateStorage`] under `progress:<root id>`. It reads
//! the tree's shape for gating and percentages but never owns the tree, so
//! the same store keeps working after the tree is rebuilt: ids that still
//! exist keep their state, ids that vanished are kept but ignored.
//!
//! # Gating
//!
//! A node *can* be completed when it is a leaf or all of its direct children
//! are complete. The store reports the gate ([`CompletionStore::can_complete`])
//! but [`CompletionStore::toggle`] does not enforce it; enforcement belongs to
//! whoever handles the user's click (see
//! [`InteractionSession::toggle`](crate::session::InteractionSession::toggle)).
//!
//! ```rust
//! use splicetree::catalog::{ItemIndex, ItemRecord, ItemId};
//! use splicetree::progress::{CompletionStore, MemoryStorage};
//! use splicetree::tree::TreeBuilder;
//!
//! let index = ItemIndex::from_records(vec![
//!     ItemRecord::new("1", "Root", Some("Leaf")),
//!     ItemRecord::new("2", "Leaf", None),
//! ]);
//! let tree = TreeBuilder::new(&index).build_from_id(&ItemId::new("1")).unwrap();
//! let mut store = CompletionStore::load(MemoryStorage::shared(), tree.root_item());
//!
//! let leaf = tree.node(1).unwrap();
//! assert!(!store.can_complete(&tree, tree.root()));
//! store.toggle(leaf.id());
//! assert!(store.can_complete(&tree, tree.root()));
//! assert_eq!(store.overall_progress(&tree), 50.0);
//! ```

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, StateStorage};

use crate::catalog::ItemId;
use crate::constants::PROGRESS_KEY_PREFIX;
use crate::tree::{NodeId, RecipeNode, RecipeTree};
use std::sync::Arc;
use storage::PersistedSet;

/// Storage key for the completion set of `root`.
pub fn progress_key(root: &ItemId) -> String {
    format!("{PROGRESS_KEY_PREFIX}{root}")
}

/// Completed node ids for one root, persisted after every mutation.
pub struct CompletionStore {
    root: ItemId,
    completed: PersistedSet,
}

impl CompletionStore {
    /// Load the completion set of `root` from `storage`.
    ///
    /// An absent, unreadable or corrupt payload yields an empty store; see
    /// [`GuideError::PersistenceCorrupt`](crate::core::GuideError::PersistenceCorrupt).
    pub fn load(storage: Arc<dyn StateStorage>, root: &ItemId) -> Self {
        let completed = PersistedSet::load(storage, progress_key(root));
        tracing::debug!(
            "Loaded {} completed node(s) for root {root} from '{}'",
            completed.members().len(),
            completed.key()
        );
        Self {
            root: root.clone(),
            completed,
        }
    }

    /// Root item this store belongs to.
    pub fn root(&self) -> &ItemId {
        &self.root
    }

    pub fn is_complete(&self, id: &NodeId) -> bool {
        self.completed.contains(id.as_str())
    }

    /// True if `node` is a leaf or every direct child is complete.
    pub fn can_complete(&self, tree: &RecipeTree, node: &RecipeNode) -> bool {
        tree.children(node).all(|child| self.is_complete(child.id()))
    }

    /// Flip the completion of `id` and persist. Returns the new state.
    ///
    /// Neither gated nor cascading: completing a parent leaves its children
    /// alone and un-completing a child leaves a completed parent completed.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        let now = self.completed.toggle(id.as_str());
        tracing::debug!("Node {id} is now {}", if now { "complete" } else { "incomplete" });
        now
    }

    /// Shallow progress of one node in `[0, 100]`.
    ///
    /// A leaf is 100 when complete and 0 otherwise; an interior node reports
    /// the share of its direct children that are complete.
    pub fn progress_of(&self, tree: &RecipeTree, node: &RecipeNode) -> f64 {
        if node.is_leaf() {
            return if self.is_complete(node.id()) {
                100.0
            } else {
                0.0
            };
        }

        let total = node.child_indices().len();
        let done = tree.children(node).filter(|child| self.is_complete(child.id())).count();
        percentage(done, total)
    }

    /// Share of all tree nodes that are complete, in `[0, 100]`.
    pub fn overall_progress(&self, tree: &RecipeTree) -> f64 {
        percentage(self.completed_count(tree), tree.len())
    }

    /// Number of nodes of `tree` that are complete.
    pub fn completed_count(&self, tree: &RecipeTree) -> usize {
        tree.iter().filter(|node| self.is_complete(node.id())).count()
    }

    /// Forget every completion for this root and persist.
    pub fn clear(&mut self) {
        self.completed.clear();
        tracing::info!("Cleared progress for root {}", self.root);
    }

    /// Raw stored ids, including ids absent from the current tree.
    pub fn completed_ids(&self) -> impl Iterator<Item = &str> {
        self.completed.members().iter().map(String::as_str)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * done as f64 / total as f64
    }
}
