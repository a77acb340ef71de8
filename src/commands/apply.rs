//! Apply command - Activate an installed cursor scheme

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Execute the apply command: bind the live cursor settings to an
/// installed registry scheme.
#[cfg(windows)]
pub fn execute(name: &str, size: Option<u32>) -> Result<()> {
    use crate::store::{ops, registry::RegistryStore};

    let mut store = RegistryStore;
    ops::apply_scheme(&mut store, name, size)
        .with_context(|| format!("Failed to apply scheme '{name}'"))?;

    println!("{} {}", "Applied:".green(), name);
    Ok(())
}

/// Execute the apply command: make an installed theme the desktop's
/// active cursor theme.
#[cfg(not(windows))]
pub fn execute(name: &str, size: Option<u32>) -> Result<()> {
    use crate::config;
    use crate::store::themes;

    themes::apply_theme(&config::icons_search_dirs()?, name, size)
        .with_context(|| format!("Failed to apply theme '{name}'"))?;

    println!("{} {}", "Applied:".green(), name);
    Ok(())
}
