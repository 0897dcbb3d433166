//! Core types shared by every splicetree module
//!
//! # Error Management
//!
//! splicetree separates errors for code from errors for people:
//! - **Strongly-typed errors** ([`GuideError`]) for precise handling in the library
//! - **User-friendly contexts** ([`ErrorContext`]) with suggestions for CLI users
//! - **Conversion** of arbitrary `anyhow` chains via [`user_friendly_error`]
//!
//! # Examples
//!
//! ```rust
//! use splicetree::core::{GuideError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn lookup() -> Result<String> {
//!     Err(GuideError::ItemNotFound { query: "Mystery Seed".into() }.into())
//! }
//!
//! if let Err(e) = lookup() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, GuideError, user_friendly_error};
