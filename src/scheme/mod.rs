//! Canonical scheme model
//!
//! A [`Scheme`] is the platform-neutral form of one cursor theme: a name
//! plus a fixed-length, role-indexed list of file bindings. Both parsers
//! produce it and both emitters consume it; it is never persisted.

pub mod inf;
pub mod roles;
pub mod theme;
pub mod vars;

pub use roles::{CursorRole, ROLE_COUNT};

use std::collections::HashMap;
use std::path::PathBuf;

/// File bindings of one role. A hole (both `None`) is legal and keeps its
/// position through every serialization.
#[derive(Debug, Clone, Default)]
pub struct RoleEntry {
    /// Where the cursor file currently lives, when it exists on disk
    pub source: Option<PathBuf>,
    /// Where the file belongs once the scheme is installed
    pub destination: Option<PathBuf>,
}

impl RoleEntry {
    /// True when this role has no file on either side
    pub fn is_hole(&self) -> bool {
        self.source.is_none() && self.destination.is_none()
    }
}

/// A named, complete set of role-to-file bindings for one cursor theme.
#[derive(Debug, Clone)]
pub struct Scheme {
    /// Scheme name (registry value name / `Name` key)
    pub name: String,
    /// One entry per canonical role, in [`CursorRole::ALL`] order
    pub entries: [RoleEntry; ROLE_COUNT],
    /// String variables from the config text, keyed case-insensitively
    /// (keys are stored lowercased)
    vars: HashMap<String, String>,
    /// Directory the config file was read from
    pub root: PathBuf,
}

impl Scheme {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Scheme {
            name: name.into(),
            entries: std::array::from_fn(|_| RoleEntry::default()),
            vars: HashMap::new(),
            root: root.into(),
        }
    }

    pub fn entry(&self, role: CursorRole) -> &RoleEntry {
        &self.entries[role.index()]
    }

    pub fn entry_mut(&mut self, role: CursorRole) -> &mut RoleEntry {
        &mut self.entries[role.index()]
    }

    /// Iterate entries in canonical role order
    pub fn iter(&self) -> impl Iterator<Item = (CursorRole, &RoleEntry)> {
        CursorRole::ALL.into_iter().map(|r| (r, self.entry(r)))
    }

    /// Look a variable up by case-insensitive key
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Set a variable (key stored lowercased)
    pub fn set_var(&mut self, key: &str, value: impl Into<String>) {
        self.vars.insert(key.to_lowercase(), value.into());
    }

    /// The full variable table, keys lowercased
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }

    /// Number of roles with a file binding
    pub fn bound_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_hole()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_scheme_has_role_count_holes() {
        let scheme = Scheme::new("Test", "/tmp");
        assert_eq!(scheme.entries.len(), ROLE_COUNT);
        assert!(scheme.entries.iter().all(RoleEntry::is_hole));
        assert_eq!(scheme.bound_count(), 0);
    }

    #[test]
    fn test_vars_are_case_insensitive() {
        let mut scheme = Scheme::new("Test", "/tmp");
        scheme.set_var("SCHEME_NAME", "Test");
        assert_eq!(scheme.var("scheme_name"), Some("Test"));
        assert_eq!(scheme.var("Scheme_Name"), Some("Test"));
        assert_eq!(scheme.var("missing"), None);
    }

    #[test]
    fn test_entry_indexing_follows_canonical_order() {
        let mut scheme = Scheme::new("Test", "/tmp");
        scheme.entry_mut(CursorRole::Busy).destination = Some(PathBuf::from("busy.ani"));
        let (role, entry) = scheme.iter().nth(CursorRole::Busy.index()).unwrap();
        assert_eq!(role, CursorRole::Busy);
        assert_eq!(entry.destination.as_deref(), Some(Path::new("busy.ani")));
    }
}
