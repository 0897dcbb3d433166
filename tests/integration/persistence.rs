//! State files on disk and configuration loading.

use std::path::PathBuf;
use std::sync::Arc;

use serial_test::serial;
use splicetree::catalog::ItemId;
use splicetree::catalog::favorites::FavoriteSet;
use splicetree::config::GuideConfig;
use splicetree::progress::{CompletionStore, FileStorage, StateStorage};
use splicetree::session::InteractionSession;
use splicetree::test_utils::TestEnvironment;
use splicetree::tree::NodeId;
use splicetree::viewport::ViewportConfig;

#[test]
fn test_progress_persists_across_sessions() {
    let env = TestEnvironment::rainbow().unwrap();
    let storage = Arc::new(FileStorage::new(&env.state_dir));
    let index = splicetree::test_utils::CatalogFixture::rainbow().index();

    {
        let mut session = InteractionSession::new(
            index.clone(),
            &ItemId::new("1"),
            storage.clone(),
            ViewportConfig::default(),
        )
        .unwrap();
        session.toggle(&NodeId::new("3@r.1"));
    }

    let state = env.read_state("progress%3A1.json").unwrap();
    assert_eq!(state, r#"["3@r.1"]"#);

    let session =
        InteractionSession::new(index, &ItemId::new("1"), storage, ViewportConfig::default())
            .unwrap();
    assert!(session.completion().is_complete(&NodeId::new("3@r.1")));
}

#[test]
fn test_corrupt_state_file_starts_empty() {
    let env = TestEnvironment::rainbow().unwrap();
    std::fs::create_dir_all(&env.state_dir).unwrap();
    std::fs::write(env.state_dir.join("progress%3A1.json"), "{not json").unwrap();

    let storage = Arc::new(FileStorage::new(&env.state_dir));
    let mut store = CompletionStore::load(storage.clone(), &ItemId::new("1"));
    assert_eq!(store.completed_ids().count(), 0);

    // The next mutation rewrites the file
    store.toggle(&NodeId::new("1@r"));
    assert_eq!(storage.load("progress:1").unwrap().as_deref(), Some(r#"["1@r"]"#));
}

#[test]
fn test_punctuated_roots_keep_separate_progress() {
    let env = TestEnvironment::rainbow().unwrap();
    let storage = Arc::new(FileStorage::new(&env.state_dir));

    let mut dotted = CompletionStore::load(storage.clone(), &ItemId::new("a.b"));
    dotted.toggle(&NodeId::new("x@r"));

    for root in ["a-b", "a b", "a/b", "a%2Eb"] {
        let other = CompletionStore::load(storage.clone(), &ItemId::new(root));
        assert_eq!(other.completed_ids().count(), 0, "progress of 'a.b' leaked into '{root}'");
    }

    let reloaded = CompletionStore::load(storage, &ItemId::new("a.b"));
    assert!(reloaded.is_complete(&NodeId::new("x@r")));
    assert!(env.read_state("progress%3Aa%2Eb.json").is_some());
}

#[test]
fn test_favorites_file() {
    let env = TestEnvironment::rainbow().unwrap();
    let storage = Arc::new(FileStorage::new(&env.state_dir));

    let mut favorites = FavoriteSet::load(storage.clone());
    assert!(favorites.toggle(&ItemId::new("6")));
    assert!(favorites.toggle(&ItemId::new("2")));
    assert!(!favorites.toggle(&ItemId::new("6")));

    assert_eq!(env.read_state("favorites.json").unwrap(), r#"["2"]"#);
    assert!(FavoriteSet::load(storage).contains(&ItemId::new("2")));
}

#[tokio::test]
async fn test_config_file_paths() {
    let env = TestEnvironment::rainbow().unwrap();
    let config = GuideConfig::load_from(&env.config_path).await.unwrap();

    assert_eq!(config.dataset_path().unwrap(), Some(env.dataset.clone()));
    assert_eq!(config.state_dir_path(Some(&env.config_path)).unwrap(), env.state_dir);
}

#[tokio::test]
#[serial]
async fn test_config_expands_environment_variables() {
    let env = TestEnvironment::rainbow().unwrap();
    let path = env.path().join("env.toml");
    std::fs::write(
        &path,
        "dataset = \"$SPLICETREE_TEST_DATA/items.json\"\nstate_dir = \"${SPLICETREE_TEST_DATA}/state\"\n",
    )
    .unwrap();

    // SAFETY: serialized with every other test that touches this variable
    unsafe { std::env::set_var("SPLICETREE_TEST_DATA", "/srv/splice") };
    let config = GuideConfig::load_from(&path).await.unwrap();
    let dataset = config.dataset_path();
    let state_dir = config.state_dir_path(None);
    unsafe { std::env::remove_var("SPLICETREE_TEST_DATA") };

    assert_eq!(dataset.unwrap(), Some(PathBuf::from("/srv/splice/items.json")));
    assert_eq!(state_dir.unwrap(), PathBuf::from("/srv/splice/state"));
}

#[tokio::test]
#[serial]
async fn test_config_undefined_variable_is_an_error() {
    let env = TestEnvironment::rainbow().unwrap();
    let path = env.path().join("env.toml");
    std::fs::write(&path, "dataset = \"$SPLICETREE_TEST_DATA/items.json\"\n").unwrap();

    unsafe { std::env::remove_var("SPLICETREE_TEST_DATA") };
    let config = GuideConfig::load_from(&path).await.unwrap();
    assert!(config.dataset_path().is_err());
}
