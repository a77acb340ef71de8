//! Installed cursor themes on disk.
//!
//! A theme is a directory holding a `cursors/` subdirectory plus
//! `cursor.theme`/`index.theme` descriptors. This module scans the icon
//! search path for such directories and installs, removes, and inspects
//! them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use crate::error::SchemeError;
use crate::fileops;
use crate::scheme::theme;
use crate::store::CurrentScheme;

/// One installed theme found on the search path.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeRecord {
    pub name: String,
    pub path: PathBuf,
    pub cursor_count: usize,
}

/// The descriptor file inside a theme directory, if any.
pub fn theme_file_in(theme_root: &Path) -> Option<PathBuf> {
    for candidate in ["cursor.theme", "index.theme"] {
        let path = theme_root.join(candidate);
        if path.is_file() {
            return Some(path);
        }
    }
    None
}

fn record_for(theme_root: &Path) -> Result<Option<ThemeRecord>, SchemeError> {
    let cursors = theme_root.join("cursors");
    if !cursors.is_dir() {
        return Ok(None);
    }
    let name = match theme_file_in(theme_root) {
        Some(file) => match theme::parse_scheme(&file) {
            Ok(scheme) => scheme.name,
            // A broken descriptor still marks a theme directory.
            Err(_) => fallback_name(theme_root),
        },
        None => fallback_name(theme_root),
    };
    let cursor_count = fileops::list_files(&cursors)?.len();
    Ok(Some(ThemeRecord {
        name,
        path: theme_root.to_path_buf(),
        cursor_count,
    }))
}

fn fallback_name(theme_root: &Path) -> String {
    theme_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// All themes under the given search directories, in search-path order.
pub fn list_themes(search_dirs: &[PathBuf]) -> Result<Vec<ThemeRecord>, SchemeError> {
    let mut records: Vec<ThemeRecord> = Vec::new();
    for dir in search_dirs {
        if !dir.is_dir() {
            continue;
        }
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        entries.sort();
        for entry in entries {
            if let Some(record) = record_for(&entry)? {
                if !records.iter().any(|r| r.name == record.name) {
                    records.push(record);
                }
            }
        }
    }
    Ok(records)
}

/// Locate an installed theme by name, searching in path order.
pub fn find_theme(search_dirs: &[PathBuf], name: &str) -> Result<Option<ThemeRecord>, SchemeError> {
    Ok(list_themes(search_dirs)?.into_iter().find(|r| r.name == name))
}

/// Copy a theme tree into `target_root` and refresh its descriptor files.
/// Returns the installed theme directory.
pub fn install_theme(theme_root: &Path, target_root: &Path) -> Result<PathBuf, SchemeError> {
    let file = theme_file_in(theme_root).ok_or_else(|| SchemeError::MissingFile {
        scheme: fallback_name(theme_root),
        path: theme_root.join("cursor.theme"),
    })?;
    let scheme = theme::parse_scheme(&file)?;
    fs::create_dir_all(target_root)?;
    let installed = target_root.join(&scheme.name);
    if installed.exists() && installed != theme_root {
        fs::remove_dir_all(&installed)?;
    }
    if installed != theme_root {
        fileops::copy_dir(theme_root, &installed)?;
    }
    theme::write_theme_files(&installed, &scheme.name)?;
    Ok(installed)
}

/// Remove an installed theme by name. Refuses to touch the active theme.
pub fn delete_theme(
    search_dirs: &[PathBuf],
    name: &str,
    current: Option<&str>,
) -> Result<(), SchemeError> {
    if current == Some(name) {
        return Err(SchemeError::InUse(name.to_string()));
    }
    let record = find_theme(search_dirs, name)?
        .ok_or_else(|| SchemeError::NotFound(name.to_string()))?;
    fs::remove_dir_all(&record.path)?;
    Ok(())
}

const GSETTINGS_SCHEMA: &str = "org.gnome.desktop.interface";

fn gsettings_get(key: &str) -> Option<String> {
    let output = Command::new("gsettings")
        .args(["get", GSETTINGS_SCHEMA, key])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?;
    let value = value.trim().trim_matches('\'').to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The desktop's active cursor theme, when the session exposes one.
pub fn current_theme() -> Option<CurrentScheme> {
    let name = gsettings_get("cursor-theme")?;
    let size = gsettings_get("cursor-size").and_then(|s| s.parse().ok());
    Some(CurrentScheme { name, size })
}

fn gsettings_set(key: &str, value: &str) -> Result<(), SchemeError> {
    let status = Command::new("gsettings")
        .args(["set", GSETTINGS_SCHEMA, key, value])
        .status()?;
    if !status.success() {
        return Err(SchemeError::Io(std::io::Error::other(format!(
            "gsettings set {key} exited with {status}"
        ))));
    }
    Ok(())
}

/// Make an installed theme the desktop's active cursor theme, optionally
/// changing the cursor size as well.
pub fn apply_theme(
    search_dirs: &[PathBuf],
    name: &str,
    size: Option<u32>,
) -> Result<(), SchemeError> {
    find_theme(search_dirs, name)?
        .ok_or_else(|| SchemeError::NotFound(name.to_string()))?;
    gsettings_set("cursor-theme", name)?;
    if let Some(size) = size {
        gsettings_set("cursor-size", &size.to_string())?;
    }
    Ok(())
}
