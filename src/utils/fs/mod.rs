//! File system helpers for splicetree state and configuration files
//!
//! Persisted state (completion sets and favorites) is written with
//! [`atomic_write`]: a crash mid-write leaves either the old file or the new
//! one on disk, never a truncated payload.
//!
//! # Examples
//!
//! ```rust,no_run
//! use splicetree::utils::fs::{ensure_dir, safe_write};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("state"))?;
//! safe_write(Path::new("state/favorites.json"), "[\"12\"]")?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;

pub use atomic::{atomic_write, safe_write};
pub use dirs::{ensure_dir, ensure_parent_dir};
