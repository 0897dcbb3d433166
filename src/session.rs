//! One open recipe tree and everything attached to it.
//!
//! [`InteractionSession`] is the composition root: it loads a dataset,
//! builds the tree for a root item, attaches the completion store for that
//! root and owns the viewport controller together with its resize queue. It
//! holds no algorithms of its own; it routes user actions and layout events
//! to the component that owns them.
//!
//! # Lifecycle
//!
//! 1. [`open`](InteractionSession::open) awaits the dataset load, then builds
//!    the tree (an unknown root is the only fatal error).
//! 2. The host grabs [`resize_sender`](InteractionSession::resize_sender)s
//!    and feeds container and content sizes.
//! 3. [`next_layout_event`](InteractionSession::next_layout_event) yields
//!    debounced layout events and applies the matching fit.
//! 4. [`rebuild`](InteractionSession::rebuild) swaps in another root. The old
//!    viewport and resize queue are dropped with their pending refits, so
//!    the host must take new senders.
//!
//! ```rust,no_run
//! use splicetree::catalog::ItemId;
//! use splicetree::progress::FileStorage;
//! use splicetree::session::{InteractionSession, ToggleOutcome};
//! use splicetree::tree::NodeId;
//! use splicetree::viewport::ViewportConfig;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let storage = Arc::new(FileStorage::new("state"));
//! let mut session = InteractionSession::open(
//!     Path::new("items.json"),
//!     &ItemId::new("1"),
//!     storage,
//!     ViewportConfig::default(),
//! )
//! .await?;
//!
//! match session.toggle(&NodeId::new("1@r")) {
//!     ToggleOutcome::Blocked { pending } => println!("finish {} ingredient(s) first", pending.len()),
//!     other => println!("{other:?}"),
//! }
//! println!("{:.0}% done", session.overall_progress());
//! # Ok(())
//! # }
//! ```

use crate::catalog::{ItemId, ItemIndex};
use crate::core::GuideError;
use crate::progress::{CompletionStore, StateStorage};
use crate::tree::{NodeId, RecipeTree, TreeBuilder};
use crate::viewport::resize::{LayoutEvent, ResizeQueue, ResizeSender, ResizeSource};
use crate::viewport::{ViewportConfig, ViewportController, ViewportUpdate};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Result of a gated [`InteractionSession::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The node is now complete.
    Completed,
    /// The node is no longer complete.
    Uncompleted,
    /// Completing was refused; these direct children are still incomplete.
    Blocked {
        pending: Vec<NodeId>,
    },
    /// No node with that id in the current tree.
    UnknownNode,
}

/// A loaded dataset with one open tree.
pub struct InteractionSession {
    index: ItemIndex,
    storage: Arc<dyn StateStorage>,
    viewport_config: ViewportConfig,
    tree: RecipeTree,
    completion: CompletionStore,
    viewport: ViewportController,
    resize: ResizeQueue,
}

impl InteractionSession {
    /// Load `dataset` and open the tree of `root`.
    pub async fn open(
        dataset: &Path,
        root: &ItemId,
        storage: Arc<dyn StateStorage>,
        viewport_config: ViewportConfig,
    ) -> Result<Self> {
        let index = ItemIndex::load_from_path(dataset).await?;
        Ok(Self::new(index, root, storage, viewport_config)?)
    }

    /// Open the tree of `root` over an already loaded index.
    pub fn new(
        index: ItemIndex,
        root: &ItemId,
        storage: Arc<dyn StateStorage>,
        viewport_config: ViewportConfig,
    ) -> Result<Self, GuideError> {
        let viewport_config = viewport_config.validated();
        let tree = TreeBuilder::new(&index).build_from_id(root)?;
        let completion = CompletionStore::load(Arc::clone(&storage), root);
        let viewport = ViewportController::new(viewport_config.clone());
        let resize = ResizeQueue::new(viewport_config.debounce());

        tracing::info!("Opened '{}' ({} nodes)", tree.root().display_name(), tree.len());

        Ok(Self {
            index,
            storage,
            viewport_config,
            tree,
            completion,
            viewport,
            resize,
        })
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub fn tree(&self) -> &RecipeTree {
        &self.tree
    }

    pub fn completion(&self) -> &CompletionStore {
        &self.completion
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Gestures and buttons go straight to the controller.
    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    /// Toggle a node the way a click does.
    ///
    /// Completing an interior node requires all of its direct children to be
    /// complete. Un-completing is always allowed.
    pub fn toggle(&mut self, id: &NodeId) -> ToggleOutcome {
        let Some(node) = self.tree.get(id) else {
            return ToggleOutcome::UnknownNode;
        };

        if !self.completion.is_complete(id) && !self.completion.can_complete(&self.tree, node) {
            let pending = self
                .tree
                .children(node)
                .filter(|child| !self.completion.is_complete(child.id()))
                .map(|child| child.id().clone())
                .collect();
            return ToggleOutcome::Blocked {
                pending,
            };
        }

        if self.completion.toggle(id) {
            ToggleOutcome::Completed
        } else {
            ToggleOutcome::Uncompleted
        }
    }

    /// Toggle without the gate. Returns the new state, `None` for an unknown id.
    pub fn force_toggle(&mut self, id: &NodeId) -> Option<bool> {
        self.tree.get(id)?;
        Some(self.completion.toggle(id))
    }

    /// Shallow progress of one node.
    pub fn progress_of(&self, id: &NodeId) -> Option<f64> {
        self.tree.get(id).map(|node| self.completion.progress_of(&self.tree, node))
    }

    pub fn overall_progress(&self) -> f64 {
        self.completion.overall_progress(&self.tree)
    }

    /// Forget all progress of the open root.
    pub fn reset_progress(&mut self) {
        self.completion.clear();
    }

    /// Node ids to highlight for a search box value.
    pub fn highlights(&self, query: &str) -> Vec<&NodeId> {
        self.tree.highlighted(query)
    }

    /// Producer handle for one resize feed of the current tree.
    pub fn resize_sender(&self, source: ResizeSource) -> ResizeSender {
        self.resize.sender(source)
    }

    /// Container and content senders, in that order.
    pub fn resize_senders(&self) -> (ResizeSender, ResizeSender) {
        (self.resize_sender(ResizeSource::Container), self.resize_sender(ResizeSource::Content))
    }

    /// Wait for the next debounced layout event and apply it.
    ///
    /// Returns the event together with the viewport update it caused, if any.
    pub async fn next_layout_event(&mut self) -> Option<(LayoutEvent, Option<ViewportUpdate>)> {
        let event = self.resize.next_event().await?;
        let update = self.apply_layout_event(event);
        Some((event, update))
    }

    /// Apply a layout event to the viewport.
    ///
    /// The initial fit is not animated; refits after a resize are.
    pub fn apply_layout_event(&mut self, event: LayoutEvent) -> Option<ViewportUpdate> {
        match event {
            LayoutEvent::Primed {
                container,
                content,
            } => {
                self.viewport.set_container_size(container);
                self.viewport.set_content_size(content);
                self.viewport.fit_to_container(false)
            }
            LayoutEvent::Resized {
                source,
                size,
            } => {
                match source {
                    ResizeSource::Container => self.viewport.set_container_size(size),
                    ResizeSource::Content => self.viewport.set_content_size(size),
                }
                tracing::debug!("Refitting after {source} resize to {size}");
                self.viewport.fit_to_container(true)
            }
        }
    }

    /// Open another root over the same dataset.
    ///
    /// On error the session keeps the current tree.
    pub fn rebuild(&mut self, root: &ItemId) -> Result<(), GuideError> {
        let tree = TreeBuilder::new(&self.index).build_from_id(root)?;
        self.resize.shutdown();

        self.completion = CompletionStore::load(Arc::clone(&self.storage), root);
        self.viewport = ViewportController::new(self.viewport_config.clone());
        self.resize = ResizeQueue::new(self.viewport_config.debounce());
        self.tree = tree;

        tracing::info!("Switched to '{}' ({} nodes)", self.tree.root().display_name(), self.tree.len());
        Ok(())
    }
}
