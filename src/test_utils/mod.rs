//! Test utilities for splicetree
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suites:
//! - [`init_test_logging`] installs a test-writer subscriber once
//! - [`CatalogFixture`] provides small datasets with known shapes
//! - [`TestEnvironment`] lays out a dataset, config file and state directory
//!
//! # Example
//!
//! ```rust,no_run
//! use splicetree::test_utils::{CatalogFixture, TestEnvironment};
//!
//! let env = TestEnvironment::rainbow().unwrap();
//! assert!(env.dataset.exists());
//! let index = CatalogFixture::two_cycle().index();
//! assert_eq!(index.len(), 2);
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::TestEnvironment;
pub use fixtures::{CatalogFixture, chain_catalog};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=splicetree=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
