//! Geometry laws of the viewport.

use splicetree::viewport::fit::{Point, Size, fit_transform};
use splicetree::viewport::{UpdateCause, ViewportConfig, ViewportController};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

const SIZES: [(f64, f64); 6] = [
    (800.0, 600.0),
    (2000.0, 1500.0),
    (100.0, 50.0),
    (1.0, 1.0),
    (320.0, 4000.0),
    (100_000.0, 300.0),
];

#[test]
fn test_fit_is_deterministic_and_bounded() {
    let config = ViewportConfig::default();
    for &(cw, ch) in &SIZES {
        for &(w, h) in &SIZES {
            let container = Size::new(cw, ch);
            let content = Size::new(w, h);
            let first = fit_transform(container, content, &config).unwrap();
            let second = fit_transform(container, content, &config).unwrap();
            assert_eq!(first, second);

            assert!(first.scale <= 1.0);
            assert!(first.scale >= config.min_scale);
            assert!(first.translate_x >= 0.0);
            assert!(first.translate_y >= 0.0);
        }
    }
}

#[test]
fn test_fitted_content_stays_inside_margin() {
    let config = ViewportConfig::default();
    for &(cw, ch) in &SIZES {
        for &(w, h) in &SIZES {
            let t = fit_transform(Size::new(cw, ch), Size::new(w, h), &config).unwrap();
            if t.scale > config.min_scale {
                assert!(w * t.scale <= cw * config.fit_ratio + 1e-9);
                assert!(h * t.scale <= ch * config.fit_ratio + 1e-9);
            }
        }
    }
}

#[test]
fn test_degenerate_sizes_never_fit() {
    let config = ViewportConfig::default();
    let good = Size::new(800.0, 600.0);
    for bad in [
        Size::new(0.0, 600.0),
        Size::new(800.0, 0.0),
        Size::new(-1.0, 10.0),
        Size::new(f64::NAN, 10.0),
        Size::new(f64::INFINITY, 10.0),
    ] {
        assert!(fit_transform(bad, good, &config).is_none());
        assert!(fit_transform(good, bad, &config).is_none());
    }
}

#[test]
fn test_zoom_keeps_focal_point_fixed() {
    let mut viewport = ViewportController::new(ViewportConfig::default());
    viewport.set_container_size(Size::new(800.0, 600.0));
    viewport.set_content_size(Size::new(2000.0, 1500.0));
    viewport.fit_to_container(false).unwrap();

    let focal = Point::new(123.0, 456.0);
    let before = viewport.transform();
    let content_x = (focal.x - before.translate_x) / before.scale;
    let content_y = (focal.y - before.translate_y) / before.scale;

    for delta in [-120.0, -120.0, 120.0, -40.0] {
        let after = viewport.zoom_with_wheel(delta, focal);
        assert!(approx(after.translate_x + content_x * after.scale, focal.x));
        assert!(approx(after.translate_y + content_y * after.scale, focal.y));
    }
}

#[test]
fn test_zoom_in_then_out_round_trips() {
    let mut viewport = ViewportController::new(ViewportConfig::default());
    viewport.set_container_size(Size::new(800.0, 600.0));
    let start = viewport.transform();

    viewport.zoom_in();
    viewport.zoom_out();
    let end = viewport.transform();
    assert!(approx(start.scale, end.scale));
    assert!(approx(start.translate_x, end.translate_x));
    assert!(approx(start.translate_y, end.translate_y));
}

#[test]
fn test_scale_is_clamped_under_repeated_zoom() {
    let config = ViewportConfig::default();
    let mut viewport = ViewportController::new(config.clone());
    viewport.set_container_size(Size::new(800.0, 600.0));

    for _ in 0..50 {
        viewport.zoom_in();
    }
    assert!(approx(viewport.transform().scale, config.max_scale));

    for _ in 0..100 {
        viewport.zoom_out();
    }
    assert!(approx(viewport.transform().scale, config.min_scale));
}

#[test]
fn test_subscribers_see_latest_update() {
    let mut viewport = ViewportController::new(ViewportConfig::default());
    let rx = viewport.subscribe();
    assert_eq!(rx.borrow().cause, UpdateCause::Initial);

    viewport.set_container_size(Size::new(800.0, 600.0));
    viewport.set_content_size(Size::new(400.0, 300.0));
    viewport.fit_to_container(true).unwrap();

    let latest = *rx.borrow();
    assert_eq!(latest.cause, UpdateCause::Fit);
    assert!(latest.animate);
    assert_eq!(latest.transform, viewport.transform());
}
