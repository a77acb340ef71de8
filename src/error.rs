//! Typed errors for scheme parsing, conversion and store operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the scheme core.
///
/// Every variant names the offending scheme and/or path so a retry or
/// manual cleanup is actionable from the message alone.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// Malformed scheme config text (short or over-long field lists,
    /// missing required keys).
    #[error("invalid scheme config: {0}")]
    Format(String),

    /// A path the scheme declares does not exist on disk.
    #[error("{scheme}: cursor file does not exist: {}", path.display())]
    MissingFile { scheme: String, path: PathBuf },

    /// No installed scheme with that name.
    #[error("cursor scheme not found: {0}")]
    NotFound(String),

    /// The scheme is currently active and cannot be deleted.
    #[error("cannot delete the cursor scheme currently in use: {0}")]
    InUse(String),

    /// One or more cursor files could not be removed during scheme
    /// deletion. Everything that could be removed has been; the failed
    /// paths are listed so they can be deleted manually.
    #[error(
        "failed to delete {} cursor file(s) of scheme {scheme}:{}",
        failed.len(),
        list_paths(failed)
    )]
    Delete {
        scheme: String,
        failed: Vec<PathBuf>,
    },

    /// The external bitmap converter failed for one input; the whole
    /// conversion is aborted and no partial output is kept.
    #[error("cursor conversion failed for {}: {message}", input.display())]
    Conversion { input: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("copy failed: {0}")]
    Copy(#[from] fs_extra::error::Error),
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\n - {}", p.display()))
        .collect()
}
