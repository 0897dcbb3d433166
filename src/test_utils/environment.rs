//! Isolated on-disk environment for CLI and session tests

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::CatalogFixture;

/// Temporary directory with a dataset, a config file and a state directory.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub dataset: PathBuf,
    pub state_dir: PathBuf,
    pub config_path: PathBuf,
}

impl TestEnvironment {
    /// Environment with the given dataset and a config file pointing at it.
    pub fn with_catalog(fixture: &CatalogFixture) -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let dataset = fixture.write_to(temp_dir.path())?;
        let state_dir = temp_dir.path().join("state");
        let config_path = temp_dir.path().join("config.toml");

        fs::write(
            &config_path,
            format!(
                "dataset = {:?}\nstate_dir = {:?}\n",
                dataset.display().to_string(),
                state_dir.display().to_string()
            ),
        )?;

        Ok(Self {
            temp_dir,
            dataset,
            state_dir,
            config_path,
        })
    }

    /// Environment with [`CatalogFixture::rainbow`].
    pub fn rainbow() -> Result<Self> {
        Self::with_catalog(&CatalogFixture::rainbow())
    }

    /// Root of the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Contents of a state file, if it exists.
    pub fn read_state(&self, file_name: &str) -> Option<String> {
        fs::read_to_string(self.state_dir.join(file_name)).ok()
    }
}
