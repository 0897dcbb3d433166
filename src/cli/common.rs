//! Shared plumbing for CLI subcommands.
//!
//! Every subcommand starts from a [`CommandContext`]: the loaded config file,
//! the resolved dataset path and the state directory, after command-line
//! overrides have been applied.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{ItemIndex, ItemRecord};
use crate::cli::CliConfig;
use crate::config::GuideConfig;
use crate::core::{ErrorContext, GuideError};
use crate::progress::FileStorage;

/// Resolved configuration for one CLI invocation.
#[derive(Debug)]
pub struct CommandContext {
    pub config: GuideConfig,
    pub config_path: PathBuf,
    pub dataset: Option<PathBuf>,
    pub state_dir: PathBuf,
}

impl CommandContext {
    /// Load the config file and apply command-line overrides.
    pub async fn load(cli: &CliConfig) -> Result<Self> {
        let config_path = match &cli.config_path {
            Some(path) => path.clone(),
            None => GuideConfig::default_path()?,
        };
        let config = GuideConfig::load_with_optional(Some(config_path.clone())).await?;

        let dataset = match &cli.dataset {
            Some(path) => Some(path.clone()),
            None => config.dataset_path()?,
        };
        let state_dir = match &cli.state_dir {
            Some(dir) => dir.clone(),
            None => config.state_dir_path(Some(&config_path))?,
        };

        tracing::debug!(
            "config={} dataset={:?} state_dir={}",
            config_path.display(),
            dataset,
            state_dir.display()
        );

        Ok(Self {
            config,
            config_path,
            dataset,
            state_dir,
        })
    }

    /// The configured dataset path.
    pub fn dataset_path(&self) -> Result<&Path> {
        self.dataset.as_deref().ok_or_else(|| {
            ErrorContext::new(GuideError::ConfigError {
                message: "no dataset configured".to_string(),
            })
            .with_suggestion(format!(
                "Pass --dataset <file>, set SPLICETREE_DATASET, or add `dataset = \"...\"` to {}",
                self.config_path.display()
            ))
            .into()
        })
    }

    /// Load the configured dataset.
    pub async fn load_index(&self) -> Result<ItemIndex> {
        let path = self.dataset_path()?;
        ItemIndex::load_from_path(path).await
    }

    /// File-backed state storage in the state directory.
    pub fn storage(&self) -> Arc<FileStorage> {
        Arc::new(FileStorage::new(&self.state_dir))
    }
}

/// Resolve an id or exact name, with a "did you mean" on failure.
pub fn resolve_item<'a>(index: &'a ItemIndex, query: &str) -> Result<&'a ItemRecord> {
    if let Some(record) = index.resolve(query) {
        return Ok(record);
    }

    let mut context = ErrorContext::new(GuideError::ItemNotFound {
        query: query.to_string(),
    });
    context = match index.suggest(query) {
        Some(close) => {
            context.with_suggestion(format!("Did you mean '{}' (id {})?", close.name, close.id))
        }
        None => context.with_suggestion("Run 'splicetree list' to see the available items"),
    };
    Err(context.into())
}

/// Render a percentage the way every command prints it.
pub fn format_percent(value: f64) -> String {
    format!("{value:.0}%")
}
