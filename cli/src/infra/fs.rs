//! Filesystem helpers: the data directory and export files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Data directory: `$AGENTIC_HOME`, else `~/.agentic`.
///
/// # Errors
///
/// Returns an error if neither is available.
pub fn agentic_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("AGENTIC_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
        .map(|h| h.join(".agentic"))
}

/// Write `contents` to `dir/filename` and return the full path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub async fn write_export(dir: &Path, filename: &str, contents: String) -> Result<PathBuf> {
    let path = dir.join(filename);
    let target = path.clone();
    tokio::task::spawn_blocking(move || {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        std::fs::write(&target, contents)
            .with_context(|| format!("writing export {}", target.display()))
    })
    .await
    .context("spawn_blocking for write_export")??;
    Ok(path)
}
