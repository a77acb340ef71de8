//! Install command - Register a converted scheme on the current platform

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::config;
use crate::store::themes;

/// Execute the install command for a Windows `.inf` scheme descriptor.
#[cfg(windows)]
pub fn execute(input: &Path, install_path: Option<&Path>) -> Result<()> {
    use crate::scheme::inf;
    use crate::store::{ops, registry::RegistryStore};
    use std::fs;

    if !input
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("inf"))
    {
        return install_theme_dir(input, install_path);
    }

    let text =
        fs::read_to_string(input).with_context(|| format!("Failed to read: {}", input.display()))?;
    let config_dir = input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let scheme = inf::parse_scheme(&text, &config_dir)
        .with_context(|| format!("Failed to parse: {}", input.display()))?;

    let mut store = RegistryStore;
    ops::install_from_scheme(&mut store, &scheme, install_path)
        .with_context(|| format!("Failed to install scheme '{}'", scheme.name))?;

    println!(
        "{} {} ({} cursor roles)",
        "Installed:".green(),
        scheme.name,
        scheme.bound_count()
    );
    println!("Select it under Control Panel > Mouse > Pointers.");
    Ok(())
}

/// Execute the install command for an X11 cursor theme directory.
#[cfg(not(windows))]
pub fn execute(input: &Path, install_path: Option<&Path>) -> Result<()> {
    install_theme_dir(input, install_path)
}

fn install_theme_dir(input: &Path, install_path: Option<&Path>) -> Result<()> {
    let target_root = match install_path {
        Some(dir) => dir.to_path_buf(),
        None => config::user_icons_dir()?,
    };
    let installed = themes::install_theme(input, &target_root)
        .with_context(|| format!("Failed to install theme from {}", input.display()))?;

    println!("{} {}", "Installed:".green(), installed.display());
    println!("Select it with your desktop's appearance settings.");
    Ok(())
}
