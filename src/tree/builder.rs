//! Depth-first expansion of a root item into a [`RecipeTree`].
//!
//! The catalog's ingredient graph may contain cycles (`A = B`, `B = A`) and
//! dangling references. The builder turns it into a finite tree with two
//! kinds of terminal placeholders:
//!
//! - **missing**: the ingredient name matches no record;
//! - **duplicate**: the ingredient's item is already being expanded on the
//!   path from the root to this node.
//!
//! Duplicate detection is path-scoped. An item reused by two unrelated
//! branches (a diamond) is expanded fully in each branch; only a true
//! back-reference stops expansion.
//!
//! # Example
//!
//! ```rust
//! use splicetree::catalog::{ItemIndex, ItemRecord, ItemId};
//! use splicetree::tree::{TreeBuilder, NodeKind};
//!
//! let index = ItemIndex::from_records(vec![
//!     ItemRecord::new("a", "A", Some("B")),
//!     ItemRecord::new("b", "B", Some("A")),
//! ]);
//! let tree = TreeBuilder::new(&index).build_from_id(&ItemId::new("a")).unwrap();
//!
//! assert_eq!(tree.len(), 3);
//! let kinds: Vec<_> = tree.iter().map(|n| n.kind()).collect();
//! assert_eq!(kinds, vec![NodeKind::Item, NodeKind::Item, NodeKind::Duplicate]);
//! ```

use super::{NodeId, NodeKind, RecipeNode, RecipeTree};
use crate::catalog::{ItemId, ItemIndex, ItemRecord};
use crate::core::GuideError;
use std::collections::HashSet;

/// A pending node on the explicit work stack.
enum Visit<'r> {
    /// Add an item node and queue its ingredients.
    Expand(&'r ItemRecord),
    /// Add a placeholder for a back-reference.
    Duplicate(&'r ItemRecord),
    /// Add a placeholder for an unresolved ingredient name.
    Missing(String),
    /// All descendants of this item are built; drop it from the active path.
    Leave(&'r ItemId),
}

struct Frame<'r> {
    visit: Visit<'r>,
    path: String,
    parent: Option<usize>,
    depth: usize,
}

/// Builds recipe trees against one [`ItemIndex`].
pub struct TreeBuilder<'a> {
    index: &'a ItemIndex,
}

impl<'a> TreeBuilder<'a> {
    pub const fn new(index: &'a ItemIndex) -> Self {
        Self {
            index,
        }
    }

    /// Expand `root` into a tree.
    ///
    /// # Errors
    ///
    /// [`GuideError::InvalidRoot`] when `root` is `None`. Unresolved and
    /// cyclic ingredients never fail the build; they become placeholders.
    pub fn build(&self, root: Option<&ItemRecord>) -> Result<RecipeTree, GuideError> {
        let Some(root) = root else {
            return Err(GuideError::InvalidRoot {
                reason: "no root item was provided".to_string(),
            });
        };

        let nodes = self.expand(root);

        tracing::debug!(
            "Built recipe tree for '{}' ({}): {} nodes",
            root.name,
            root.id,
            nodes.len()
        );
        Ok(RecipeTree::from_arena(root.id.clone(), nodes))
    }

    /// Resolve `id` in the index and expand it.
    pub fn build_from_id(&self, id: &ItemId) -> Result<RecipeTree, GuideError> {
        match self.index.get(id) {
            Some(record) => self.build(Some(record)),
            None => Err(GuideError::InvalidRoot {
                reason: format!("no item with id '{id}'"),
            }),
        }
    }

    /// Preorder walk over an explicit stack, so chain length is bounded by
    /// memory rather than by the thread's stack.
    ///
    /// `active` holds the items on the path from the root to the node being
    /// expanded. A `Leave` frame sits below each item's ingredients and
    /// removes the item once its whole subtree is done.
    fn expand<'r>(&'r self, root: &'r ItemRecord) -> Vec<RecipeNode> {
        let mut nodes = Vec::new();
        let mut active: HashSet<&ItemId> = HashSet::new();
        let mut stack = vec![Frame {
            visit: Visit::Expand(root),
            path: "r".to_string(),
            parent: None,
            depth: 0,
        }];

        while let Some(Frame {
            visit,
            path,
            parent,
            depth,
        }) = stack.pop()
        {
            let node = match &visit {
                Visit::Leave(id) => {
                    active.remove(*id);
                    continue;
                }
                Visit::Missing(name) => RecipeNode::new(
                    NodeId::missing(&path),
                    NodeKind::Missing,
                    None,
                    name.as_str(),
                    None,
                    parent,
                    depth,
                ),
                Visit::Duplicate(record) => RecipeNode::new(
                    NodeId::duplicate(&record.id, &path),
                    NodeKind::Duplicate,
                    Some(record.id.clone()),
                    record.name.clone(),
                    record.image.clone(),
                    parent,
                    depth,
                ),
                Visit::Expand(record) => RecipeNode::new(
                    NodeId::item(&record.id, &path),
                    NodeKind::Item,
                    Some(record.id.clone()),
                    record.name.clone(),
                    record.image.clone(),
                    parent,
                    depth,
                ),
            };

            let idx = nodes.len();
            nodes.push(node);
            if let Some(parent) = parent {
                nodes[parent].children.push(idx);
            }

            let Visit::Expand(record) = visit else {
                continue;
            };

            active.insert(&record.id);
            stack.push(Frame {
                visit: Visit::Leave(&record.id),
                path: String::new(),
                parent: None,
                depth,
            });

            let parsed = self.index.recipe_of(record);
            if !parsed.issues.is_empty() {
                tracing::debug!("Recipe of '{}' has issues: {:?}", record.name, parsed.issues);
            }

            let mut children = Vec::with_capacity(parsed.expr.ingredients().len());
            for (position, ingredient) in parsed.expr.ingredients().iter().enumerate() {
                let visit = match self.index.find_by_name(ingredient.name()) {
                    None => {
                        tracing::debug!(
                            "{}",
                            GuideError::UnresolvedIngredient {
                                parent: record.name.clone(),
                                ingredient: ingredient.name().to_string(),
                            }
                        );
                        Visit::Missing(ingredient.name().to_string())
                    }
                    Some(child) if active.contains(&child.id) => {
                        let mut chain = ancestor_names(&nodes, idx);
                        chain.push(&child.name);
                        tracing::debug!(
                            "{}",
                            GuideError::CyclicReference {
                                chain: chain.join(" → "),
                            }
                        );
                        Visit::Duplicate(child)
                    }
                    Some(child) => Visit::Expand(child),
                };
                children.push(Frame {
                    visit,
                    path: format!("{path}.{position}"),
                    parent: Some(idx),
                    depth: depth + 1,
                });
            }
            // reversed so the first ingredient is popped first
            stack.extend(children.into_iter().rev());
        }

        nodes
    }
}

/// Display names from the root down to `idx`.
fn ancestor_names(nodes: &[RecipeNode], idx: usize) -> Vec<&str> {
    let mut names = Vec::new();
    let mut current = Some(idx);
    while let Some(i) = current {
        names.push(nodes[i].display_name.as_str());
        current = nodes[i].parent;
    }
    names.reverse();
    names
}
