//! Geometry of the content surface inside its container.
//!
//! Screen coordinates of a content point `c` are `translate + scale * c`.
//! Everything here is pure; [`ViewportController`](super::ViewportController)
//! owns the state.

use super::ViewportConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
        }
    }

    /// True when either dimension is zero, negative or not finite.
    ///
    /// Layout reports `0 x 0` before the first paint; fitting against it
    /// would divide by zero.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Center point of a box of this size anchored at the origin.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = String;

    /// Parse `WIDTHxHEIGHT`, e.g. `800x600`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w.trim().parse::<f64>().map_err(|e| format!("invalid width '{w}': {e}"))?;
        let height = h.trim().parse::<f64>().map_err(|e| format!("invalid height '{h}': {e}"))?;
        Ok(Self::new(width, height))
    }
}

/// A point in container (screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
        }
    }
}

/// Pan and zoom applied to the content surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewportTransform {
    /// Scale 1, no translation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Zoom to `new_scale` keeping the content point under `focal` fixed.
    pub fn zoomed_at(&self, new_scale: f64, focal: Point) -> Self {
        let ratio = new_scale / self.scale;
        Self {
            scale: new_scale,
            translate_x: focal.x - (focal.x - self.translate_x) * ratio,
            translate_y: focal.y - (focal.y - self.translate_y) * ratio,
        }
    }

    /// Shift by a screen-space delta.
    pub fn panned(&self, dx: f64, dy: f64) -> Self {
        Self {
            scale: self.scale,
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
        }
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Best-fit transform of `content` inside `container`.
///
/// The content may occupy `fit_ratio` of the container on each axis and is
/// never magnified past 1. The scale is floored at `min_scale` (and capped
/// at `max_scale`). Each axis is centered; when the floored content is
/// larger than the container its offset is pinned to 0 rather than going
/// negative.
///
/// Returns `None` when either size is degenerate.
///
/// ```rust
/// use splicetree::viewport::{ViewportConfig, fit::{fit_transform, Size}};
///
/// let t = fit_transform(Size::new(800.0, 600.0), Size::new(2000.0, 1500.0), &ViewportConfig::default())
///     .unwrap();
/// assert!((t.scale - 0.34).abs() < 1e-9);
/// assert!((t.translate_x - 60.0).abs() < 1e-9);
/// assert!((t.translate_y - 45.0).abs() < 1e-9);
/// ```
pub fn fit_transform(
    container: Size,
    content: Size,
    config: &ViewportConfig,
) -> Option<ViewportTransform> {
    if container.is_degenerate() || content.is_degenerate() {
        return None;
    }

    let scale_x = container.width * config.fit_ratio / content.width;
    let scale_y = container.height * config.fit_ratio / content.height;
    let scale = config.clamp_scale(scale_x.min(scale_y).min(1.0));

    Some(ViewportTransform {
        scale,
        translate_x: ((container.width - content.width * scale) / 2.0).max(0.0),
        translate_y: ((container.height - content.height * scale) / 2.0).max(0.0),
    })
}
