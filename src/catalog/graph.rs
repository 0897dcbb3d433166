//! Whole-catalog recipe graph for dataset checks.
//!
//! The tree builder copes with dangling and cyclic references one root at a
//! time. [`RecipeGraph`] looks at the entire catalog at once so data problems
//! can be reported before anyone opens a tree: ingredient names without a
//! record, recipe cycles and malformed delimiters.

use super::recipe::RecipeIssue;
use super::{ItemId, ItemIndex};
use crate::core::GuideError;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

/// A recipe whose text needed repairs while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecipe {
    pub item: ItemId,
    pub name: String,
    pub issues: Vec<RecipeIssue>,
}

/// Findings of [`RecipeGraph::report`].
#[derive(Debug, Clone, Default)]
pub struct CatalogReport {
    /// Items in the dataset
    pub items: usize,
    /// Items with at least one ingredient
    pub craftable: usize,
    /// [`GuideError::UnresolvedIngredient`] per dangling reference
    pub unresolved: Vec<GuideError>,
    /// [`GuideError::CyclicReference`] per strongly connected component
    pub cycles: Vec<GuideError>,
    /// Recipes with empty ingredient slots
    pub malformed: Vec<MalformedRecipe>,
}

impl CatalogReport {
    /// True when nothing was found.
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.cycles.is_empty() && self.malformed.is_empty()
    }
}

/// Directed graph item → ingredient item over a whole catalog.
pub struct RecipeGraph<'a> {
    index: &'a ItemIndex,
    graph: DiGraph<usize, ()>,
    node_map: HashMap<&'a ItemId, NodeIndex>,
    unresolved: Vec<GuideError>,
}

impl<'a> RecipeGraph<'a> {
    /// Build the graph. Ingredients resolve by exact name, first record wins.
    pub fn from_index(index: &'a ItemIndex) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();
        let mut unresolved = Vec::new();

        for (position, record) in index.records().iter().enumerate() {
            node_map.entry(&record.id).or_insert_with(|| graph.add_node(position));
        }

        for (record, parsed) in index.entries() {
            let Some(&from) = node_map.get(&record.id) else {
                continue;
            };
            for ingredient in parsed.expr.ingredients() {
                match index.find_by_name(ingredient.name()).and_then(|r| node_map.get(&r.id)) {
                    Some(&to) => {
                        if !graph.contains_edge(from, to) {
                            graph.add_edge(from, to, ());
                        }
                    }
                    None => unresolved.push(GuideError::UnresolvedIngredient {
                        parent: record.name.clone(),
                        ingredient: ingredient.name().to_string(),
                    }),
                }
            }
        }

        Self {
            index,
            graph,
            node_map,
            unresolved,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Ids of the items `id`'s recipe resolves to, in edge order.
    pub fn direct_ingredients(&self, id: &ItemId) -> Vec<&'a ItemId> {
        let Some(&node) = self.node_map.get(id) else {
            return Vec::new();
        };
        let mut ids: Vec<_> = self.graph.neighbors(node).map(|n| self.item_id(n)).collect();
        // petgraph yields neighbors newest edge first
        ids.reverse();
        ids
    }

    /// Every recipe cycle as a closed chain of item names, e.g. `["A", "B", "A"]`.
    ///
    /// One chain is reported per strongly connected component; a
    /// self-referencing item yields `["A", "A"]`.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();
        for component in tarjan_scc(&self.graph) {
            let is_cycle = component.len() > 1
                || component.first().is_some_and(|&n| self.graph.contains_edge(n, n));
            if !is_cycle {
                continue;
            }
            let members: HashSet<NodeIndex> = component.iter().copied().collect();
            let Some(&start) = component.iter().min_by_key(|&&n| self.graph[n]) else {
                continue;
            };
            let chain = self.closed_walk(start, &members);
            cycles.push(chain.into_iter().map(|n| self.item_name(n).to_string()).collect());
        }
        cycles.sort();
        cycles
    }

    /// Full report over the catalog.
    pub fn report(&self) -> CatalogReport {
        let cycles = self
            .cycles()
            .into_iter()
            .map(|chain| GuideError::CyclicReference {
                chain: chain.join(" → "),
            })
            .collect();

        let malformed = self
            .index
            .entries()
            .filter(|(_, parsed)| !parsed.issues.is_empty())
            .map(|(record, parsed)| MalformedRecipe {
                item: record.id.clone(),
                name: record.name.clone(),
                issues: parsed.issues.clone(),
            })
            .collect();

        CatalogReport {
            items: self.index.len(),
            craftable: self.index.craftable().len(),
            unresolved: self.unresolved.clone(),
            cycles,
            malformed,
        }
    }

    /// Shortest walk `start → ... → start` inside one component (BFS).
    fn closed_walk(&self, start: NodeIndex, members: &HashSet<NodeIndex>) -> Vec<NodeIndex> {
        if self.graph.contains_edge(start, start) {
            return vec![start, start];
        }

        let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors(current) {
                if next == start {
                    let mut walk = vec![current];
                    let mut cursor = current;
                    while let Some(&prev) = came_from.get(&cursor) {
                        walk.push(prev);
                        cursor = prev;
                    }
                    // walk runs from current back to start
                    walk.reverse();
                    walk.push(start);
                    return walk;
                }
                if members.contains(&next) && next != start && !came_from.contains_key(&next) {
                    came_from.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        vec![start]
    }

    fn item_id(&self, node: NodeIndex) -> &'a ItemId {
        &self.index.records()[self.graph[node]].id
    }

    fn item_name(&self, node: NodeIndex) -> &'a str {
        &self.index.records()[self.graph[node]].name
    }
}
