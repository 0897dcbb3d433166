//! Command-line interface for splicetree.
//!
//! # Available Commands
//!
//! - `list` - List craftable items, favorites first
//! - `favorite` - Mark or unmark an item as favorite
//! - `tree` - Show the recipe tree of an item with completion state
//! - `toggle` - Mark a tree node complete or incomplete
//! - `status` - Summarize progress on an item
//! - `reset` - Forget all progress on an item
//! - `check` - Report dataset problems (missing ingredients, cycles)
//! - `fit` - Compute the fit-to-frame transform for given sizes
//!
//! # Global Options
//!
//! - `-v, --verbose` - Debug logging
//! - `-q, --quiet` - Errors only
//! - `-c, --config <PATH>` - Config file (`SPLICETREE_CONFIG`)
//! - `--dataset <PATH>` - Dataset file (`SPLICETREE_DATASET`)
//! - `--state-dir <PATH>` - State directory (`SPLICETREE_STATE_DIR`)
//!
//! # Examples
//!
//! ```bash
//! splicetree --dataset items.json list --search seed
//! splicetree tree "Rainbow Tree Seed" --depth 2
//! splicetree toggle 1 1@r.0.0
//! splicetree fit --container 800x600 --content 2000x1500
//! ```

mod check;
pub mod common;
mod fit;
mod list;
mod progress;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use common::CommandContext;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Filter directive for the log subscriber. `None` defers to `RUST_LOG`.
    pub log_level: Option<String>,

    pub config_path: Option<PathBuf>,

    pub dataset: Option<PathBuf>,

    pub state_dir: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// An explicit level wins; otherwise `RUST_LOG` is used, falling back to
    /// `info`.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Splicing recipe trees with progress tracking.
#[derive(Parser)]
#[command(
    name = "splicetree",
    about = "Explore splicing recipes as dependency trees and track your progress",
    version,
    long_about = "splicetree expands an item's splicing recipe into a tree of ingredients, \
                  marks missing and circular ingredients, and remembers which steps you have completed."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file
    #[arg(short, long, global = true, env = "SPLICETREE_CONFIG")]
    config: Option<PathBuf>,

    /// Dataset file (JSON array of items), overrides the config file
    #[arg(long, global = true, env = "SPLICETREE_DATASET")]
    dataset: Option<PathBuf>,

    /// Directory for progress and favorites, overrides the config file
    #[arg(long, global = true, env = "SPLICETREE_STATE_DIR")]
    state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List craftable items, favorites first
    List(list::ListCommand),

    /// Add or remove an item from favorites
    Favorite(list::FavoriteCommand),

    /// Show the recipe tree of an item
    Tree(tree::TreeCommand),

    /// Mark a node of an item's tree complete or incomplete
    Toggle(progress::ToggleCommand),

    /// Show progress on an item
    Status(progress::StatusCommand),

    /// Forget all progress on an item
    Reset(progress::ResetCommand),

    /// Check the dataset for missing ingredients, cycles and malformed recipes
    Check(check::CheckCommand),

    /// Compute the fit-to-frame transform for a container and content size
    Fit(fit::FitCommand),
}

impl Cli {
    /// Execute with logging configured from the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            dataset: self.dataset.clone(),
            state_dir: self.state_dir.clone(),
        }
    }

    /// Execute with an explicit configuration; logging is left untouched.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let ctx = CommandContext::load(&config).await?;
        match self.command {
            Commands::List(cmd) => cmd.execute(&ctx).await,
            Commands::Favorite(cmd) => cmd.execute(&ctx).await,
            Commands::Tree(cmd) => cmd.execute(&ctx).await,
            Commands::Toggle(cmd) => cmd.execute(&ctx).await,
            Commands::Status(cmd) => cmd.execute(&ctx).await,
            Commands::Reset(cmd) => cmd.execute(&ctx).await,
            Commands::Check(cmd) => cmd.execute(&ctx).await,
            Commands::Fit(cmd) => cmd.execute(&ctx),
        }
    }
}
