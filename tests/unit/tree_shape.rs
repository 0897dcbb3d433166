//! Shape laws of built recipe trees.

use std::collections::HashSet;

use splicetree::catalog::{ItemId, ItemIndex, ItemRecord};
use splicetree::test_utils::{CatalogFixture, chain_catalog};
use splicetree::tree::{NodeId, NodeKind, RecipeTree, TreeBuilder};

fn build(index: &ItemIndex, root: &str) -> RecipeTree {
    TreeBuilder::new(index).build_from_id(&ItemId::new(root)).unwrap()
}

/// Number of leaves obtained by expanding names by hand, ignoring cycles.
fn expected_leaves(index: &ItemIndex, name: &str, stack: &mut Vec<String>) -> usize {
    let Some(record) = index.find_by_name(name) else {
        return 1;
    };
    if stack.iter().any(|seen| seen == name) {
        return 1;
    }
    let parsed = index.recipe_of(record);
    let names = parsed.expr.ingredient_names();
    if names.is_empty() {
        return 1;
    }
    stack.push(name.to_string());
    let total = names.iter().map(|n| expected_leaves(index, n, stack)).sum();
    stack.pop();
    total
}

#[test]
fn test_leaf_count_matches_manual_expansion() {
    for (fixture, root) in [
        (CatalogFixture::rainbow(), "1"),
        (CatalogFixture::rainbow(), "6"),
        (CatalogFixture::diamond(), "top"),
        (CatalogFixture::two_cycle(), "a"),
        (CatalogFixture::sloppy(), "1"),
        (CatalogFixture::sloppy(), "3"),
    ] {
        let index = fixture.index();
        let tree = build(&index, root);
        let root_name = index.get(&ItemId::new(root)).unwrap().name.clone();
        assert_eq!(
            tree.leaves().count(),
            expected_leaves(&index, &root_name, &mut Vec::new()),
            "fixture {} root {root}",
            fixture.name
        );
    }
}

#[test]
fn test_ids_are_unique_and_parents_consistent() {
    let index = CatalogFixture::diamond().index();
    let tree = build(&index, "top");

    let ids: HashSet<&NodeId> = tree.iter().map(|n| n.id()).collect();
    assert_eq!(ids.len(), tree.len());

    for node in tree.iter() {
        for child in tree.children(node) {
            assert_eq!(tree.parent(child).unwrap().id(), node.id());
            assert_eq!(child.depth(), node.depth() + 1);
        }
    }
    assert!(tree.parent(tree.root()).is_none());
}

#[test]
fn test_rebuild_yields_identical_ids() {
    let index = CatalogFixture::rainbow().index();
    let first: Vec<NodeId> = build(&index, "1").iter().map(|n| n.id().clone()).collect();
    let second: Vec<NodeId> = build(&index, "1").iter().map(|n| n.id().clone()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_every_cycle_terminates_with_duplicate() {
    // Ring of n items, each needing the next; the last needs the first.
    for n in 1..=8 {
        let records = (0..n)
            .map(|i| {
                let next = format!("R{}", (i + 1) % n);
                ItemRecord::new(format!("r{i}"), format!("R{i}"), Some(next.as_str()))
            })
            .collect();
        let index = ItemIndex::from_records(records);
        let tree = build(&index, "r0");

        assert_eq!(tree.len(), n + 1, "ring of {n}");
        let leaf = tree.leaves().next().unwrap();
        assert_eq!(leaf.kind(), NodeKind::Duplicate);
        assert_eq!(leaf.display_name(), "R0");
    }
}

#[test]
fn test_diamond_is_expanded_in_both_branches() {
    let index = CatalogFixture::diamond().index();
    let tree = build(&index, "top");
    assert!(tree.iter().all(|n| n.kind() == NodeKind::Item));
    assert_eq!(tree.iter().filter(|n| n.display_name() == "Base").count(), 2);
}

#[test]
fn test_long_chain_depth() {
    let index = chain_catalog(2_000);
    let tree = build(&index, "n0");
    assert_eq!(tree.len(), 2_000);
    assert_eq!(tree.leaves().next().unwrap().depth(), 1_999);
}

#[test]
fn test_missing_nodes_carry_ingredient_name() {
    let index = CatalogFixture::rainbow().index();
    let tree = build(&index, "6");
    let missing: Vec<_> = tree.iter().filter(|n| n.kind() == NodeKind::Missing).collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].display_name(), "Fire Seed");
    assert!(missing[0].source_item_id().is_none());
    assert!(missing[0].is_placeholder());
}
