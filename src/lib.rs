//! splicetree - splicing recipes as dependency trees
//!
//! Items in a crafting dataset may be spliced from other items. splicetree
//! expands an item's recipe into a tree of ingredients down to the raw
//! materials, tolerates broken data (missing ingredients, recipe cycles)
//! and remembers which steps of each tree the player has completed.
//!
//! # Architecture Overview
//!
//! Data flows one way:
//!
//! ```text
//! dataset.json ─► catalog::ItemIndex ─► tree::TreeBuilder ─► tree::RecipeTree
//!                                                            │
//!             progress::CompletionStore (per root) ◄─────────┤
//!             viewport::ViewportController ◄── resize queue ─┘
//! ```
//!
//! [`session::InteractionSession`] wires these together for one open tree.
//!
//! # Core Modules
//!
//! - [`catalog`] - Item records, recipe parsing, lookup, favorites and dataset checks
//! - [`tree`] - Recipe tree construction with path-scoped cycle detection
//! - [`progress`] - Completion tracking and the key-value state storage
//! - [`viewport`] - Fit-to-frame math, zoom and pan, debounced resize events
//! - [`session`] - One loaded dataset with one open tree
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface
//! - [`config`] - User configuration file (`~/.splicetree/config.toml`)
//! - [`core`] - Error types and user-facing error formatting
//! - [`constants`] - Recipe syntax, viewport defaults and storage keys
//! - [`utils`] - Atomic file writes and path expansion
//!
//! # Dataset Format
//!
//! A JSON array of items. `recipe` (or `splicing`) is an ingredient list
//! joined by `" + "`; `"N/A"`, an empty string or a missing field mean the
//! item cannot be spliced.
//!
//! ```json
//! [
//!   { "id": 1, "name": "Rainbow Tree Seed", "recipe": "Diamond Seed + Magic Seed" },
//!   { "id": 2, "name": "Diamond Seed", "recipe": "Carbon Seed + Pressure Seed" },
//!   { "id": 3, "name": "Magic Seed", "recipe": "N/A", "image": "img/magic.png" }
//! ]
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! splicetree --dataset items.json list --favorites
//! splicetree tree 1 --search seed
//! splicetree toggle 1 4@r.0.0
//! splicetree status 1
//! splicetree check --strict
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod progress;
pub mod session;
pub mod tree;
pub mod utils;
pub mod viewport;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
