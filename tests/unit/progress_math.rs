//! Gating and percentage laws of the completion store.

use splicetree::catalog::ItemId;
use splicetree::progress::{CompletionStore, MemoryStorage, StateStorage, progress_key};
use splicetree::test_utils::CatalogFixture;
use splicetree::tree::{NodeId, RecipeTree, TreeBuilder};

fn rainbow() -> RecipeTree {
    let index = CatalogFixture::rainbow().index();
    TreeBuilder::new(&index).build_from_id(&ItemId::new("1")).unwrap()
}

#[test]
fn test_overall_progress_is_monotonic_when_completing() {
    let tree = rainbow();
    let mut store = CompletionStore::load(MemoryStorage::shared(), tree.root_item());

    let mut last = store.overall_progress(&tree);
    assert_eq!(last, 0.0);

    // Complete bottom-up so every step passes the gate
    let mut order: Vec<_> = tree.iter().collect();
    order.sort_by_key(|node| std::cmp::Reverse(node.depth()));
    for node in order {
        assert!(store.can_complete(&tree, node), "{} should be ready", node.id());
        store.toggle(node.id());
        let now = store.overall_progress(&tree);
        assert!(now > last);
        last = now;
    }
    assert_eq!(last, 100.0);
}

#[test]
fn test_progress_bounds_for_every_subset() {
    let tree = rainbow();
    let ids: Vec<NodeId> = tree.iter().map(|n| n.id().clone()).collect();

    for mask in 0u32..(1 << ids.len()) {
        let mut store = CompletionStore::load(MemoryStorage::shared(), tree.root_item());
        for (bit, id) in ids.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                store.toggle(id);
            }
        }
        let expected = f64::from(mask.count_ones()) * 100.0 / ids.len() as f64;
        assert!((store.overall_progress(&tree) - expected).abs() < 1e-9);
        for node in tree.iter() {
            let p = store.progress_of(&tree, node);
            assert!((0.0..=100.0).contains(&p));
        }
    }
}

#[test]
fn test_leaf_progress_is_binary() {
    let tree = rainbow();
    let mut store = CompletionStore::load(MemoryStorage::shared(), tree.root_item());
    let magic = tree.get(&NodeId::new("3@r.1")).unwrap();

    assert_eq!(store.progress_of(&tree, magic), 0.0);
    store.toggle(magic.id());
    assert_eq!(store.progress_of(&tree, magic), 100.0);
}

#[test]
fn test_interior_progress_is_shallow() {
    let tree = rainbow();
    let mut store = CompletionStore::load(MemoryStorage::shared(), tree.root_item());

    // Grandchildren do not count toward the root
    store.toggle(&NodeId::new("4@r.0.0"));
    store.toggle(&NodeId::new("5@r.0.1"));
    assert_eq!(store.progress_of(&tree, tree.root()), 0.0);

    store.toggle(&NodeId::new("2@r.0"));
    let expected = 100.0 / 3.0;
    assert!((store.progress_of(&tree, tree.root()) - expected).abs() < 1e-9);
}

#[test]
fn test_store_survives_reload_and_ignores_stale_ids() {
    let tree = rainbow();
    let storage = MemoryStorage::shared();
    storage.insert(progress_key(tree.root_item()), r#"["2@r.0","gone@r.9"]"#);

    let store = CompletionStore::load(storage.clone(), tree.root_item());
    assert!(store.is_complete(&NodeId::new("2@r.0")));
    assert_eq!(store.completed_count(&tree), 1);
    assert_eq!(store.completed_ids().count(), 2);

    let payload = storage.load(&progress_key(tree.root_item())).unwrap().unwrap();
    assert!(payload.contains("gone@r.9"));
}

#[test]
fn test_roots_do_not_share_progress() {
    let storage = MemoryStorage::shared();
    let mut first = CompletionStore::load(storage.clone(), &ItemId::new("1"));
    first.toggle(&NodeId::new("3@r.1"));

    let second = CompletionStore::load(storage.clone(), &ItemId::new("6"));
    assert_eq!(second.completed_ids().count(), 0);
    assert!(storage.get("progress:1").is_some());
    assert!(storage.get("progress:6").is_none());
}
