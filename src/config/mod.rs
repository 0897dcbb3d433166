//! Configuration for splicetree.
//!
//! There is a single user-level file, [`GuideConfig`], in TOML. Every key is
//! optional; command-line flags override the file.

pub mod global;

pub use global::GuideConfig;
