//! Integration test suite for splicetree
//!
//! End-to-end tests that drive the library through [`InteractionSession`]
//! and the `splicetree` binary through `assert_cmd`. Every test works in
//! its own temporary directory.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **session_flow**: toggling, resize debouncing and rebuilds with paused time
//! - **persistence**: state files on disk, corrupt payloads, config expansion
//! - **cli_tree**: `tree` output formats
//! - **cli_progress**: `toggle`, `status` and `reset`
//! - **cli_catalog**: `list`, `favorite`, `check` and `fit`
//!
//! [`InteractionSession`]: splicetree::session::InteractionSession

use assert_cmd::Command;
use splicetree::test_utils::TestEnvironment;

mod cli_progress;
mod cli_tree;
mod persistence;
mod session_flow;

/// `splicetree --config <env config>` with ambient overrides cleared.
pub fn splicetree(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("splicetree").unwrap();
    cmd.current_dir(env.path())
        .env_remove("SPLICETREE_DATASET")
        .env_remove("SPLICETREE_STATE_DIR")
        .env_remove("SPLICETREE_CONFIG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&env.config_path);
    cmd
}
