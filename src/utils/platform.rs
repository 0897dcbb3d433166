//! Platform helpers for paths taken from configuration and the command line.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns true on Windows.
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Expand `~` and environment variables (`$VAR`, `${VAR}`) in a path.
///
/// # Errors
///
/// Fails when the path references an undefined variable or the home
/// directory cannot be determined.
///
/// ```rust,no_run
/// use splicetree::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let dataset = resolve_path("~/.splicetree/items.json")?;
/// # Ok(())
/// # }
/// ```
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).with_context(|| {
        let platform_vars = if is_windows() {
            "Common Windows variables: $USERPROFILE, $LOCALAPPDATA"
        } else {
            "Common Unix variables: $HOME, $XDG_DATA_HOME"
        };
        format!(
            "Failed to expand path: {path}\n\n\
            Check for undefined environment variables.\n\
            {platform_vars}"
        )
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}
