//! Unit test suite for splicetree
//!
//! Behavioural checks of the library that go beyond a single module:
//! tree shape laws, progress arithmetic and viewport geometry.
//!
//! # Running Unit Tests
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! # Test Organization
//!
//! - **tree_shape**: leaf counts, cycle termination, id stability
//! - **progress_math**: gating and percentage laws
//! - **viewport_math**: fit idempotence, zoom anchoring, clamping

mod progress_math;
mod tree_shape;
mod viewport_math;
