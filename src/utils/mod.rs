//! Utility helpers used across splicetree
//!
//! - [`fs`]: atomic writes for persisted state and directory creation
//! - [`platform`]: `~` and environment variable expansion for configured paths

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, safe_write};
pub use platform::resolve_path;
