//! Uninstall command - Remove an installed scheme and its orphaned files

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Execute the uninstall command against the registry scheme store.
#[cfg(windows)]
pub fn execute(name: &str) -> Result<()> {
    use crate::store::{ops, registry::RegistryStore};

    let mut store = RegistryStore;
    ops::delete_scheme(&mut store, name)
        .with_context(|| format!("Failed to uninstall scheme '{name}'"))?;

    println!("{} {}", "Removed:".green(), name);
    Ok(())
}

/// Execute the uninstall command against the installed theme directories.
#[cfg(not(windows))]
pub fn execute(name: &str) -> Result<()> {
    use crate::config;
    use crate::store::themes;

    let search_dirs = config::icons_search_dirs()?;
    let current = themes::current_theme().map(|c| c.name);
    themes::delete_theme(&search_dirs, name, current.as_deref())
        .with_context(|| format!("Failed to uninstall theme '{name}'"))?;

    println!("{} {}", "Removed:".green(), name);
    Ok(())
}
