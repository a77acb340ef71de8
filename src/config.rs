//! Platform-specific configuration and paths

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable overriding the completion-asset directory.
pub const ASSETS_DIR_ENV: &str = "CURSWAP_ASSETS_DIR";

/// Get the directory holding the bundled completion cursor files.
///
/// These X11 cursor files stand in for roles the source scheme does not
/// provide. Overridable via `CURSWAP_ASSETS_DIR`, otherwise
/// `<data dir>/curswap/cursors` (e.g. `~/.local/share/curswap/cursors`).
pub fn completion_assets_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ASSETS_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join("curswap").join("cursors"))
}

/// Get the directory cursor themes are installed into for the current user
/// (`~/.local/share/icons` on Linux)
pub fn user_icons_dir() -> Result<PathBuf> {
    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join("icons"))
}

/// Get every directory searched for installed cursor themes, in lookup
/// order: `~/.icons`, the user icons dir, then the system-wide dir.
pub fn icons_search_dirs() -> Result<Vec<PathBuf>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let mut dirs = vec![home.join(".icons")];
    if let Ok(user) = user_icons_dir() {
        dirs.push(user);
    }
    dirs.push(PathBuf::from("/usr/share/icons"));
    Ok(dirs)
}
