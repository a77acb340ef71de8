//! Cross-platform conversion engine
//!
//! Orchestrates per-role bitmap conversion through an injected
//! [`CursorConverter`] capability, substitutes bundled completion assets,
//! materializes alias links, and emits the target platform's config file.
//! All work happens inside a scoped temporary workspace that is removed on
//! every exit path; the finished tree is copied out only when the whole
//! conversion succeeded.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::SchemeError;
use crate::fileops;
use crate::scheme::inf::{self, RoleFileNames};
use crate::scheme::{theme, CursorRole, Scheme};

/// One bitmap conversion job for the external converter.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// Existing source cursor file; the engine never requests conversion
    /// of a missing input
    pub input: PathBuf,
    /// Directory the converted file must end up in
    pub output_dir: PathBuf,
    /// Desired output file name (extension may be appended by the
    /// converter's native format)
    pub save_name: String,
}

/// External bitmap re-encoding capability. The engine treats it as a black
/// box: only file existence and naming are inspected.
pub trait CursorConverter {
    fn convert(&self, request: &ConvertRequest) -> Result<PathBuf, SchemeError>;
}

/// Engine options shared by both directions.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory of bundled completion cursor files, keyed by X11 filename
    pub completion_dir: PathBuf,
}

/// Production converter: shells out to an external converter program
/// (`win2xcur` / `x2wincur` compatible: `<program> [args] <input> -o <dir>`)
/// and renames its output to the requested save name.
pub struct CommandConverter {
    program: String,
    extra_args: Vec<String>,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>) -> Self {
        CommandConverter {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

impl CursorConverter for CommandConverter {
    fn convert(&self, request: &ConvertRequest) -> Result<PathBuf, SchemeError> {
        fs::create_dir_all(&request.output_dir)?;

        let output = Command::new(&self.program)
            .args(&self.extra_args)
            .arg(&request.input)
            .arg("-o")
            .arg(&request.output_dir)
            .output()
            .map_err(|e| SchemeError::Conversion {
                input: request.input.clone(),
                message: format!("failed to run {}: {e}", self.program),
            })?;

        if !output.status.success() {
            return Err(SchemeError::Conversion {
                input: request.input.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        locate_produced_file(request).ok_or_else(|| SchemeError::Conversion {
            input: request.input.clone(),
            message: format!("{} produced no output file", self.program),
        })
    }
}

/// Find the converter's output and rename it to the requested save name,
/// keeping whatever extension the converter's native format added.
fn locate_produced_file(request: &ConvertRequest) -> Option<PathBuf> {
    let exact = request.output_dir.join(&request.save_name);
    if exact.is_file() {
        return Some(exact);
    }

    let input_stem = request.input.file_stem()?.to_owned();
    let candidate = fileops::list_files(&request.output_dir)
        .ok()?
        .into_iter()
        .find(|f| f.file_stem() == Some(input_stem.as_os_str()))?;

    let mut target_name = request.save_name.clone();
    if !target_name.contains('.') {
        if let Some(ext) = candidate.extension().and_then(|e| e.to_str()) {
            target_name = format!("{target_name}.{ext}");
        }
    }
    let target = request.output_dir.join(target_name);
    fs::rename(&candidate, &target).ok()?;
    Some(target)
}

/// Convert a Windows scheme into an installable X11 cursor theme tree
/// under `output_root`, returning the theme's path.
pub fn win_to_x11(
    scheme: &Scheme,
    output_root: &Path,
    converter: &dyn CursorConverter,
    options: &ConvertOptions,
) -> Result<PathBuf, SchemeError> {
    let staging = tempfile::tempdir()?;
    let theme_root = staging.path().join(&scheme.name);
    let cursors_dir = theme_root.join("cursors");
    fs::create_dir_all(&cursors_dir)?;

    for (role, entry) in scheme.iter() {
        let spec = role.spec();
        let asset = options.completion_dir.join(spec.theme_file);

        if !spec.completion {
            if let Some(source) = &entry.source {
                converter.convert(&ConvertRequest {
                    input: source.clone(),
                    output_dir: cursors_dir.clone(),
                    save_name: spec.theme_file.to_string(),
                })?;
                continue;
            }
        }

        // Completion roles and roles the scheme does not provide: copy the
        // bundled asset when one is present, otherwise keep the hole.
        if asset.is_file() {
            fileops::copy_file(&asset, &cursors_dir.join(spec.theme_file))?;
        }
    }

    for role in CursorRole::ALL {
        let spec = role.spec();
        if !cursors_dir.join(spec.theme_file).exists() {
            continue;
        }
        for alias in spec.aliases {
            fileops::link_or_copy(Path::new(spec.theme_file), &cursors_dir.join(alias))?;
        }
    }

    theme::write_theme_files(&theme_root, &scheme.name)?;

    export_tree(&theme_root, output_root, &scheme.name)
}

/// Convert an X11 cursor theme into an installable Windows scheme package
/// under `output_root`, returning the package's path.
pub fn x11_to_win(
    scheme: &Scheme,
    output_root: &Path,
    converter: &dyn CursorConverter,
) -> Result<PathBuf, SchemeError> {
    let staging = tempfile::tempdir()?;
    let pkg_root = staging.path().join(&scheme.name);
    fs::create_dir_all(&pkg_root)?;

    let mut files: RoleFileNames = std::array::from_fn(|_| None);
    for (role, entry) in scheme.iter() {
        // A role the theme does not provide stays a positional hole.
        let Some(source) = &entry.source else {
            continue;
        };
        let produced = converter.convert(&ConvertRequest {
            input: source.clone(),
            output_dir: pkg_root.clone(),
            save_name: role.spec().registry_value.to_string(),
        })?;
        files[role.index()] = produced
            .file_name()
            .and_then(|f| f.to_str())
            .map(String::from);
    }

    let descriptor = inf::render_scheme(&scheme.name, &files, None);
    fs::write(pkg_root.join("AutoSetup.inf"), descriptor)?;

    export_tree(&pkg_root, output_root, &scheme.name)
}

/// Copy the finished staging tree into the output root (copy, not move:
/// the staging workspace is always dropped by its owner).
fn export_tree(tree: &Path, output_root: &Path, name: &str) -> Result<PathBuf, SchemeError> {
    fs::create_dir_all(output_root)?;
    let out = output_root.join(name);
    if out.exists() {
        fs::remove_dir_all(&out)?;
    }
    fileops::copy_dir(tree, &out)?;
    Ok(out)
}
