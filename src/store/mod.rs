//! Installed-scheme store
//!
//! Persistent scheme state is owned entirely by the OS: registry values on
//! Windows, theme directories on X11 desktops. The registry side is
//! reached through the [`SchemeStore`] capability so the install/delete
//! logic stays platform-free and testable.

pub mod ops;
#[cfg(windows)]
pub mod registry;
pub mod themes;

use serde::Serialize;

use crate::error::SchemeError;

/// One record in the scheme store: the scheme name and the raw
/// comma-joined positional path list exactly as stored.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeRecord {
    pub name: String,
    pub raw_value: String,
}

/// The store's notion of the active scheme.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentScheme {
    pub name: String,
    /// Cursor base size, when the platform tracks one
    pub size: Option<u32>,
}

/// Keyed scheme store capability: scheme name to positional path list,
/// plus one distinguished "current" entry. State is read fresh on every
/// call; nothing is cached across calls.
pub trait SchemeStore {
    /// Every record currently in the store, in store order
    fn list(&self) -> Result<Vec<SchemeRecord>, SchemeError>;

    /// Raw value of one scheme, `None` when the name is not present
    fn read(&self, name: &str) -> Result<Option<String>, SchemeError>;

    /// Create or replace a scheme record
    fn write(&mut self, name: &str, value: &str) -> Result<(), SchemeError>;

    /// Remove a record; `false` when the name was not present
    fn remove(&mut self, name: &str) -> Result<bool, SchemeError>;

    /// The active scheme, when one is set
    fn current(&self) -> Result<Option<CurrentScheme>, SchemeError>;

    /// Make `name` the active scheme: bind its positional path list to the
    /// live cursor settings and optionally change the cursor base size
    fn set_current(
        &mut self,
        name: &str,
        role_paths: &[String],
        size: Option<u32>,
    ) -> Result<(), SchemeError>;
}
