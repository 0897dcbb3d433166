//! Global constants used throughout the splicetree codebase.
//!
//! Recipe syntax, viewport defaults, and persistence keys live here so the
//! numbers that shape rendering and storage are discoverable in one place.

/// Literal delimiter between ingredient names in a recipe expression.
pub const RECIPE_DELIMITER: &str = " + ";

/// Recipe value meaning "this item cannot be spliced".
///
/// Distinct from an absent or blank recipe, although all three produce a leaf.
pub const NO_RECIPE_SENTINEL: &str = "N/A";

/// Fraction of the container a fitted tree may occupy.
///
/// The remaining 15% is left as a visual margin around the content.
pub const DEFAULT_FIT_RATIO: f64 = 0.85;

/// Smallest scale the viewport will ever apply.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Largest scale the viewport will ever apply.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Exponent used by button zoom: each step multiplies the scale by `exp(0.3)`.
pub const DEFAULT_ZOOM_STEP: f64 = 0.3;

/// Wheel zoom uses a third of the button step per notch.
pub const WHEEL_STEP_DIVISOR: f64 = 3.0;

/// Quiet window applied to each resize stream before a refit (250ms).
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;

/// Lower bound for a configured debounce window.
pub const MIN_RESIZE_DEBOUNCE_MS: u64 = 50;

/// Prefix of the persistence key holding one root's completion set.
pub const PROGRESS_KEY_PREFIX: &str = "progress:";

/// Persistence key holding the favorite item ids.
pub const FAVORITES_KEY: &str = "favorites";

/// Maximum edit distance for "did you mean" suggestions on item names.
pub const SUGGESTION_MAX_DISTANCE: usize = 3;
