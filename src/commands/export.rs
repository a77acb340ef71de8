//! Export command - Package an installed scheme for another machine

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

/// Execute the export command: rebuild an installable package from the
/// registry record and the cursor files it points at.
#[cfg(windows)]
pub fn execute(name: &str, output: &Path, install_path: Option<&Path>) -> Result<()> {
    use crate::error::SchemeError;
    use crate::fileops;
    use crate::scheme::{inf, vars, ROLE_COUNT};
    use crate::store::{registry::RegistryStore, SchemeStore};
    use std::fs;

    let store = RegistryStore;
    let raw = store
        .read(name)
        .with_context(|| format!("Failed to read scheme '{name}'"))?
        .ok_or_else(|| SchemeError::NotFound(name.to_string()))?;

    let out = output.join(name);
    fs::create_dir_all(&out)?;

    let mut files: inf::RoleFileNames = std::array::from_fn(|_| None);
    for (index, value) in raw.split(',').enumerate().take(ROLE_COUNT) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let source = std::path::PathBuf::from(vars::resolve_env(value));
        let copied = fileops::copy_file_into(&source, &out)?;
        files[index] = copied
            .file_name()
            .and_then(|f| f.to_str())
            .map(String::from);
    }

    let descriptor = inf::render_scheme(name, &files, install_path);
    fs::write(out.join("AutoSetup.inf"), descriptor)?;

    println!("{} {}", "Exported:".green(), out.display());
    Ok(())
}

/// Execute the export command: copy an installed theme tree out of the
/// icon search path.
#[cfg(not(windows))]
pub fn execute(name: &str, output: &Path, _install_path: Option<&Path>) -> Result<()> {
    use crate::config;
    use crate::error::SchemeError;
    use crate::fileops;
    use crate::store::themes;
    use std::fs;

    let record = themes::find_theme(&config::icons_search_dirs()?, name)?
        .ok_or_else(|| SchemeError::NotFound(name.to_string()))?;

    fs::create_dir_all(output)?;
    let out = output.join(name);
    if out.exists() {
        fs::remove_dir_all(&out)?;
    }
    fileops::copy_dir(&record.path, &out)
        .with_context(|| format!("Failed to export theme '{name}'"))?;

    println!("{} {}", "Exported:".green(), out.display());
    Ok(())
}
