//! X11 cursor theme parsing and theme-file emission
//!
//! A theme is a directory holding `index.theme` / `cursor.theme` and a
//! `cursors/` subdirectory of cursor files. Roles resolve by exact
//! filename match against the role table.

use std::path::Path;

use super::{inf, CursorRole, Scheme};
use crate::error::SchemeError;
use crate::fileops;

/// Parse a theme description file (`index.theme` or `cursor.theme`) and
/// the sibling `cursors/` directory into a canonical [`Scheme`].
pub fn parse_scheme(theme_file: &Path) -> Result<Scheme, SchemeError> {
    if !theme_file.is_file() {
        // No descriptor to take the name from yet; the theme directory
        // name is the best identifier available.
        let scheme = theme_file
            .parent()
            .and_then(|p| p.file_name())
            .or_else(|| theme_file.file_stem())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed theme".to_string());
        return Err(SchemeError::MissingFile {
            scheme,
            path: theme_file.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(theme_file)?;
    let sections = inf::parse_sections(&text);

    let keys = sections
        .get("icon theme")
        .map(|lines| inf::parse_key_values(lines))
        .ok_or_else(|| SchemeError::Format("missing [Icon Theme] section".to_string()))?;

    let name = keys
        .get("name")
        .cloned()
        .ok_or_else(|| SchemeError::Format("missing Name in [Icon Theme]".to_string()))?;

    let theme_root = theme_file.parent().unwrap_or_else(|| Path::new("."));
    let cursors_dir = theme_root.join("cursors");
    if !cursors_dir.is_dir() {
        return Err(SchemeError::MissingFile {
            scheme: name,
            path: cursors_dir,
        });
    }

    let mut scheme = Scheme::new(name, theme_root);
    for (key, value) in keys {
        scheme.set_var(&key, value);
    }

    for file in fileops::list_files(&cursors_dir)? {
        let Some(file_name) = file.file_name().and_then(|f| f.to_str()) else {
            continue;
        };
        if let Some(role) = CursorRole::from_theme_file(file_name) {
            let entry = scheme.entry_mut(role);
            entry.source = Some(file.clone());
            entry.destination = Some(file);
        }
    }

    Ok(scheme)
}

/// Write `cursor.theme` and `index.theme` into a theme root.
///
/// Pure template fills; both files are regenerated on install so the
/// theme always describes itself under its installed name.
pub fn write_theme_files(theme_root: &Path, name: &str) -> Result<(), SchemeError> {
    let cursor_theme = format!("[Icon Theme]\nName={name}\nInherits={name}\n");
    let index_theme = format!(
        "[Icon Theme]\nName={name}\nComment={name} cursor theme\nInherits={name}\n"
    );
    std::fs::write(theme_root.join("cursor.theme"), cursor_theme)?;
    std::fs::write(theme_root.join("index.theme"), index_theme)?;
    Ok(())
}
