//! Pan, zoom and fit-to-frame for the tree surface.
//!
//! [`ViewportController`] owns the [`ViewportTransform`] of a content surface
//! inside a fixed-size container. Two kinds of producers change it:
//!
//! - **gestures**: drag panning, wheel zoom and the zoom buttons;
//! - **programmatic fit**: the initial fit, refits after a debounced resize
//!   (see [`resize`]), and [`reset`](ViewportController::reset).
//!
//! Every method takes `&mut self`, so the two can never interleave. A fit
//! requested while a drag is in progress is held back and applied when the
//! drag ends, so the surface never jumps under the pointer.
//!
//! Each change is published as a [`ViewportUpdate`] on a
//! [`tokio::sync::watch`] channel for the rendering side.
//!
//! ```rust
//! use splicetree::viewport::{ViewportConfig, ViewportController, fit::Size};
//!
//! let mut viewport = ViewportController::new(ViewportConfig::default());
//! let updates = viewport.subscribe();
//!
//! viewport.set_container_size(Size::new(800.0, 600.0));
//! viewport.set_content_size(Size::new(2000.0, 1500.0));
//! let fitted = viewport.fit_to_container(false).unwrap();
//!
//! assert!((fitted.transform.scale - 0.34).abs() < 1e-9);
//! assert_eq!(updates.borrow().transform, fitted.transform);
//! ```

pub mod fit;
pub mod resize;

use crate::constants::{
    DEFAULT_FIT_RATIO, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_RESIZE_DEBOUNCE_MS,
    DEFAULT_ZOOM_STEP, MIN_RESIZE_DEBOUNCE_MS, WHEEL_STEP_DIVISOR,
};
use crate::core::GuideError;
use fit::{Point, Size, fit_transform};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;

pub use fit::ViewportTransform;

/// Tunables of the viewport, the `[viewport]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Share of the container a fitted tree may occupy, in `(0, 1]`.
    pub fit_ratio: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Button zoom multiplies the scale by `exp(zoom_step)`.
    pub zoom_step: f64,
    /// Quiet window per resize feed, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fit_ratio: DEFAULT_FIT_RATIO,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            zoom_step: DEFAULT_ZOOM_STEP,
            debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
        }
    }
}

impl ViewportConfig {
    /// Replace nonsensical values so the controller can rely on them.
    ///
    /// - non-positive or non-finite scales, ratio or step fall back to defaults
    /// - a ratio above 1 falls back to the default
    /// - `min_scale > max_scale` swaps the two
    /// - the debounce window is floored at 50 ms
    #[must_use]
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.fit_ratio) || self.fit_ratio > 1.0 {
            tracing::warn!("fit_ratio {} is outside (0, 1], using {}", self.fit_ratio, defaults.fit_ratio);
            self.fit_ratio = defaults.fit_ratio;
        }
        if !positive(self.min_scale) {
            self.min_scale = defaults.min_scale;
        }
        if !positive(self.max_scale) {
            self.max_scale = defaults.max_scale;
        }
        if self.min_scale > self.max_scale {
            tracing::warn!("min_scale {} exceeds max_scale {}, swapping", self.min_scale, self.max_scale);
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if !positive(self.zoom_step) {
            self.zoom_step = defaults.zoom_step;
        }
        self.debounce_ms = self.debounce_ms.max(MIN_RESIZE_DEBOUNCE_MS);
        self
    }

    /// Resize debounce window.
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Bound `scale` to `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

/// What produced a [`ViewportUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateCause {
    Initial,
    Fit,
    Zoom,
    Pan,
    Reset,
    Fullscreen,
}

/// A transform change for the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportUpdate {
    pub transform: ViewportTransform,
    /// Whether the change should be animated.
    pub animate: bool,
    pub fullscreen: bool,
    pub cause: UpdateCause,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    origin: Point,
    start: ViewportTransform,
    last: Point,
}

/// Pan/zoom state of one tree surface.
pub struct ViewportController {
    config: ViewportConfig,
    transform: ViewportTransform,
    home: Option<ViewportTransform>,
    container: Option<Size>,
    content: Option<Size>,
    fullscreen: bool,
    drag: Option<Drag>,
    deferred_fit: Option<bool>,
    updates: watch::Sender<ViewportUpdate>,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        let (updates, _) = watch::channel(ViewportUpdate {
            transform: ViewportTransform::IDENTITY,
            animate: false,
            fullscreen: false,
            cause: UpdateCause::Initial,
        });
        Self {
            config: config.validated(),
            transform: ViewportTransform::IDENTITY,
            home: None,
            container: None,
            content: None,
            fullscreen: false,
            drag: None,
            deferred_fit: None,
            updates,
        }
    }

    /// Receiver of every published update; starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<ViewportUpdate> {
        self.updates.subscribe()
    }

    pub const fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub const fn transform(&self) -> ViewportTransform {
        self.transform
    }

    /// Transform of the last successful fit.
    pub const fn home(&self) -> Option<ViewportTransform> {
        self.home
    }

    pub const fn container_size(&self) -> Option<Size> {
        self.container
    }

    pub const fn content_size(&self) -> Option<Size> {
        self.content
    }

    pub fn set_container_size(&mut self, size: Size) {
        self.container = Some(size);
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.content = Some(size);
    }

    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub const fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    fn publish(&mut self, transform: ViewportTransform, animate: bool, cause: UpdateCause) -> ViewportUpdate {
        self.transform = transform;
        let update = ViewportUpdate {
            transform,
            animate,
            fullscreen: self.fullscreen,
            cause,
        };
        self.updates.send_replace(update);
        update
    }

    fn focal_center(&self) -> Point {
        self.container.map_or(Point::new(0.0, 0.0), |size| size.center())
    }

    fn zoom_by(&mut self, factor: f64, focal: Point, animate: bool) -> ViewportTransform {
        let old = self.transform.scale;
        let new = self.config.clamp_scale(old * factor);
        if (new - old).abs() <= f64::EPSILON {
            return self.transform;
        }
        let zoomed = self.transform.zoomed_at(new, focal);
        // an active drag continues from the zoomed transform
        if let Some(drag) = self.drag.as_mut() {
            drag.origin = drag.last;
            drag.start = zoomed;
        }
        self.publish(zoomed, animate, UpdateCause::Zoom).transform
    }

    /// Zoom in one step around the container center.
    pub fn zoom_in(&mut self) -> ViewportTransform {
        self.zoom_by(self.config.zoom_step.exp(), self.focal_center(), true)
    }

    /// Zoom out one step around the container center.
    pub fn zoom_out(&mut self) -> ViewportTransform {
        self.zoom_by((-self.config.zoom_step).exp(), self.focal_center(), true)
    }

    /// Wheel zoom around the pointer. Negative `delta_y` (wheel up) zooms in.
    pub fn zoom_with_wheel(&mut self, delta_y: f64, focal: Point) -> ViewportTransform {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return self.transform;
        }
        let step = self.config.zoom_step / WHEEL_STEP_DIVISOR;
        let factor = if delta_y < 0.0 {
            step.exp()
        } else {
            (-step).exp()
        };
        self.zoom_by(factor, focal, false)
    }

    /// Start a drag at `point`.
    pub fn begin_pan(&mut self, point: Point) {
        self.drag = Some(Drag {
            origin: point,
            start: self.transform,
            last: point,
        });
    }

    /// Move the drag to `point`. Ignored when no drag is active.
    pub fn pan_to(&mut self, point: Point) -> ViewportTransform {
        let Some(drag) = self.drag.as_mut() else {
            return self.transform;
        };
        drag.last = point;
        let moved = drag.start.panned(point.x - drag.origin.x, point.y - drag.origin.y);
        self.publish(moved, false, UpdateCause::Pan).transform
    }

    /// End the drag and apply a fit that was requested during it.
    pub fn end_pan(&mut self) -> Option<ViewportUpdate> {
        self.drag = None;
        let animate = self.deferred_fit.take()?;
        tracing::debug!("Applying fit deferred by drag");
        self.fit_to_container(animate)
    }

    /// Fit the content to the container and make the result the home transform.
    ///
    /// Returns `None` when the layout is degenerate or when a drag is in
    /// progress (the fit then runs at [`end_pan`](Self::end_pan)).
    pub fn fit_to_container(&mut self, animate: bool) -> Option<ViewportUpdate> {
        if self.drag.is_some() {
            self.deferred_fit = Some(self.deferred_fit.unwrap_or(false) || animate);
            tracing::debug!("Fit requested during drag, deferring");
            return None;
        }

        let container = self.container.unwrap_or(Size::new(0.0, 0.0));
        let content = self.content.unwrap_or(Size::new(0.0, 0.0));
        let Some(fitted) = fit_transform(container, content, &self.config) else {
            tracing::debug!(
                "{}",
                GuideError::DegenerateLayout {
                    container: container.to_string(),
                    content: content.to_string(),
                }
            );
            return None;
        };

        self.home = Some(fitted);
        Some(self.publish(fitted, animate, UpdateCause::Fit))
    }

    /// Go back to the home transform.
    ///
    /// Without a home yet a fit is attempted; if that is impossible the
    /// transform returns to the identity.
    pub fn reset(&mut self) -> ViewportTransform {
        self.drag = None;
        self.deferred_fit = None;
        let target = match self.home {
            Some(home) => home,
            None => {
                let container = self.container.unwrap_or(Size::new(0.0, 0.0));
                let content = self.content.unwrap_or(Size::new(0.0, 0.0));
                match fit_transform(container, content, &self.config) {
                    Some(fitted) => {
                        self.home = Some(fitted);
                        fitted
                    }
                    None => ViewportTransform::IDENTITY,
                }
            }
        };
        self.publish(target, true, UpdateCause::Reset).transform
    }

    /// Flip fullscreen. Returns the new state.
    ///
    /// The container resize that follows arrives through the resize feed.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.publish(self.transform, false, UpdateCause::Fullscreen);
        self.fullscreen
    }

    /// Leave fullscreen (the escape key). Returns whether anything changed.
    pub fn exit_fullscreen(&mut self) -> bool {
        if !self.fullscreen {
            return false;
        }
        self.toggle_fullscreen();
        true
    }
}
