//! Shared filesystem helpers

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SchemeError;

/// Copy a file into a directory, keeping its name. The directory is
/// created when missing. Returns the path of the copy.
pub fn copy_file_into(src: &Path, dst_dir: &Path) -> Result<PathBuf, SchemeError> {
    if !src.is_file() {
        return Err(SchemeError::MissingFile {
            scheme: String::new(),
            path: src.to_path_buf(),
        });
    }
    let file_name = src
        .file_name()
        .ok_or_else(|| SchemeError::Format(format!("not a file path: {}", src.display())))?;
    fs::create_dir_all(dst_dir)?;
    let dst = dst_dir.join(file_name);
    fs::copy(src, &dst)?;
    Ok(dst)
}

/// Copy a file to an exact destination path, creating parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), SchemeError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Copy a directory tree to `dst` (the copy gets `dst` itself as root).
pub fn copy_dir(src: &Path, dst: &Path) -> Result<(), SchemeError> {
    let options = fs_extra::dir::CopyOptions::new()
        .copy_inside(true)
        .overwrite(true);
    fs_extra::dir::copy(src, dst, &options)?;
    Ok(())
}

/// Create a symbolic link `link` pointing at `target`, falling back to a
/// plain file copy where links are unsupported. `target` is interpreted
/// relative to the link's directory, as cursor theme aliases are.
pub fn link_or_copy(target: &Path, link: &Path) -> Result<(), SchemeError> {
    match symlink(target, link) {
        Ok(()) => Ok(()),
        Err(_) => {
            let resolved = match link.parent() {
                Some(parent) if target.is_relative() => parent.join(target),
                _ => target.to_path_buf(),
            };
            fs::copy(&resolved, link)?;
            Ok(())
        }
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// List the files directly inside a directory (no recursion), in
/// name-sorted order.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, SchemeError> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() || e.path_is_symlink())
        .map(|e| e.into_path())
        .collect();
    files.sort();
    Ok(files)
}
