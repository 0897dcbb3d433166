//! Session-level flows with the tokio clock paused.

use std::time::Duration;

use splicetree::catalog::ItemId;
use splicetree::progress::MemoryStorage;
use splicetree::session::{InteractionSession, ToggleOutcome};
use splicetree::test_utils::{CatalogFixture, TestEnvironment};
use splicetree::tree::NodeId;
use splicetree::viewport::fit::{Point, Size};
use splicetree::viewport::resize::{LayoutEvent, ResizeSource};
use splicetree::viewport::{UpdateCause, ViewportConfig};

fn rainbow_session() -> InteractionSession {
    InteractionSession::new(
        CatalogFixture::rainbow().index(),
        &ItemId::new("1"),
        MemoryStorage::shared(),
        ViewportConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_open_from_disk() {
    let env = TestEnvironment::rainbow().unwrap();
    let session = InteractionSession::open(
        &env.dataset,
        &ItemId::new("1"),
        MemoryStorage::shared(),
        ViewportConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(session.tree().len(), 6);
    assert_eq!(session.index().len(), 6);
    assert_eq!(session.highlights("seed").len(), 5);
}

#[tokio::test]
async fn test_open_unknown_root_fails() {
    let env = TestEnvironment::rainbow().unwrap();
    let result = InteractionSession::open(
        &env.dataset,
        &ItemId::new("999"),
        MemoryStorage::shared(),
        ViewportConfig::default(),
    )
    .await;
    assert!(result.is_err());
}

#[test]
fn test_complete_whole_tree_bottom_up() {
    let mut session = rainbow_session();

    assert!(matches!(session.toggle(&NodeId::new("1@r")), ToggleOutcome::Blocked { .. }));

    for id in ["4@r.0.0", "5@r.0.1", "2@r.0", "3@r.1", "missing@r.2", "1@r"] {
        assert_eq!(session.toggle(&NodeId::new(id)), ToggleOutcome::Completed, "{id}");
    }
    assert_eq!(session.overall_progress(), 100.0);
    assert_eq!(session.progress_of(&NodeId::new("1@r")), Some(100.0));
}

#[tokio::test(start_paused = true)]
async fn test_initial_fit_then_debounced_refit() {
    let mut session = rainbow_session();
    let (container, content) = session.resize_senders();

    container.send(Size::new(800.0, 600.0));
    content.send(Size::new(2000.0, 1500.0));

    let (event, update) = session.next_layout_event().await.unwrap();
    assert!(matches!(event, LayoutEvent::Primed { .. }));
    let update = update.unwrap();
    assert_eq!(update.cause, UpdateCause::Fit);
    assert!(!update.animate);
    assert!((update.transform.scale - 0.34).abs() < 1e-9);

    // A burst of container sizes settles into one refit at the last size
    for width in [900.0, 1000.0, 1100.0, 1200.0] {
        container.send(Size::new(width, 600.0));
        tokio::time::advance(Duration::from_millis(10)).await;
    }

    let (event, update) = session.next_layout_event().await.unwrap();
    assert_eq!(
        event,
        LayoutEvent::Resized {
            source: ResizeSource::Container,
            size: Size::new(1200.0, 600.0),
        }
    );
    let update = update.unwrap();
    assert!(update.animate);
    assert_eq!(session.viewport().container_size(), Some(Size::new(1200.0, 600.0)));
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_size_does_not_refit() {
    let mut session = rainbow_session();
    let (container, content) = session.resize_senders();
    container.send(Size::new(800.0, 600.0));
    content.send(Size::new(400.0, 300.0));
    session.next_layout_event().await.unwrap();

    container.send(Size::new(640.0, 480.0));
    container.send(Size::new(800.0, 600.0));

    let waited =
        tokio::time::timeout(Duration::from_secs(5), session.next_layout_event()).await;
    assert!(waited.is_err(), "no event expected for a size that came back");
}

#[tokio::test(start_paused = true)]
async fn test_refit_waits_for_drag_to_end() {
    let mut session = rainbow_session();
    let (container, content) = session.resize_senders();
    container.send(Size::new(800.0, 600.0));
    content.send(Size::new(2000.0, 1500.0));
    session.next_layout_event().await.unwrap();

    session.viewport_mut().begin_pan(Point::new(10.0, 10.0));
    session.viewport_mut().pan_to(Point::new(60.0, 30.0));

    container.send(Size::new(1600.0, 1200.0));
    let (_, update) = session.next_layout_event().await.unwrap();
    assert!(update.is_none());

    let update = session.viewport_mut().end_pan().unwrap();
    assert_eq!(update.cause, UpdateCause::Fit);
    assert!(update.animate);
    assert!((update.transform.scale - 0.68).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_rebuild_discards_pending_refit() {
    let mut session = rainbow_session();
    let (container, content) = session.resize_senders();
    container.send(Size::new(800.0, 600.0));
    content.send(Size::new(2000.0, 1500.0));
    session.next_layout_event().await.unwrap();

    // Pending window on the old tree
    container.send(Size::new(1000.0, 600.0));
    tokio::time::advance(Duration::from_millis(10)).await;

    session.rebuild(&ItemId::new("6")).unwrap();
    assert!(!container.send(Size::new(1100.0, 600.0)));
    assert_eq!(session.viewport().home(), None);

    let (container, content) = session.resize_senders();
    container.send(Size::new(500.0, 500.0));
    content.send(Size::new(100.0, 100.0));
    let (event, update) = session.next_layout_event().await.unwrap();
    assert_eq!(
        event,
        LayoutEvent::Primed {
            container: Size::new(500.0, 500.0),
            content: Size::new(100.0, 100.0),
        }
    );
    assert_eq!(update.unwrap().transform.scale, 1.0);
}

#[test]
fn test_reset_and_fullscreen_controls() {
    let mut session = rainbow_session();
    let viewport = session.viewport_mut();

    // Nothing laid out yet: reset falls back to identity
    assert_eq!(viewport.reset().scale, 1.0);

    viewport.set_container_size(Size::new(800.0, 600.0));
    viewport.set_content_size(Size::new(2000.0, 1500.0));
    viewport.zoom_in();
    let home = viewport.reset();
    assert!((home.scale - 0.34).abs() < 1e-9);

    assert!(viewport.toggle_fullscreen());
    assert!(viewport.exit_fullscreen());
    assert!(!viewport.exit_fullscreen());
}
