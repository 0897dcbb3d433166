//! User configuration file for splicetree.
//!
//! # Location
//!
//! - **Unix/macOS**: `~/.splicetree/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\splicetree\config.toml`
//!
//! The `--config` flag (or `SPLICETREE_CONFIG`) points at another file. A
//! missing file means defaults.
//!
//! # File Format
//!
//! ```toml
//! # Dataset of items, a JSON array
//! dataset = "~/games/items.json"
//!
//! # Where completion progress and favorites are stored
//! # (defaults to the `state` directory next to this file)
//! state_dir = "~/.splicetree/state"
//!
//! [viewport]
//! fit_ratio = 0.85
//! min_scale = 0.1
//! max_scale = 5.0
//! zoom_step = 0.3
//! debounce_ms = 250
//! ```

use crate::core::GuideError;
use crate::utils::platform::resolve_path;
use crate::viewport::ViewportConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Dataset path, `~` and `$VAR` are expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,

    /// State directory, `~` and `$VAR` are expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<String>,

    /// Viewport tunables.
    #[serde(default)]
    pub viewport: ViewportConfig,
}

impl GuideConfig {
    /// Load from the default location, or defaults if there is no file.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// A missing file yields the defaults.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load and validate a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(GuideError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.viewport = config.viewport.validated();
        Ok(config)
    }

    /// Write the configuration as pretty TOML, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Directory holding the default config file and state.
    pub fn default_dir() -> Result<PathBuf> {
        let dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("splicetree")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".splicetree")
        };
        Ok(dir)
    }

    /// Default config file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::default_dir()?.join("config.toml"))
    }

    /// Expanded dataset path, if configured.
    pub fn dataset_path(&self) -> Result<Option<PathBuf>> {
        self.dataset.as_deref().map(resolve_path).transpose()
    }

    /// Expanded state directory.
    ///
    /// Without a `state_dir` key this is `state/` next to the config file
    /// that was loaded (`config_path`), or inside the default directory.
    pub fn state_dir_path(&self, config_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = self.state_dir.as_deref() {
            return resolve_path(dir);
        }
        let base = match config_path.and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Self::default_dir()?,
        };
        Ok(base.join("state"))
    }
}
