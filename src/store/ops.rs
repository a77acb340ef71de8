//! Store operations: install, delete, enumerate
//!
//! These work against any [`SchemeStore`] backend. Deletion implements
//! reference-counted file cleanup as an explicit set difference computed
//! fresh on every call: a file is removed only when no other recorded
//! scheme references it.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{CurrentScheme, SchemeRecord, SchemeStore};
use crate::error::SchemeError;
use crate::fileops;
use crate::scheme::{vars, Scheme, ROLE_COUNT};

/// Register a scheme under `name` from its positional path list.
///
/// Every non-blank entry must exist on disk after environment-variable
/// resolution; the first missing path fails the whole call before
/// anything is written.
pub fn install_scheme(
    store: &mut dyn SchemeStore,
    name: &str,
    role_paths: &[String],
) -> Result<(), SchemeError> {
    if role_paths.len() != ROLE_COUNT {
        return Err(SchemeError::Format(format!(
            "scheme {name} has {} path entries, expected {ROLE_COUNT}",
            role_paths.len()
        )));
    }

    for path in role_paths {
        let path = path.trim();
        if path.is_empty() {
            continue;
        }
        let resolved = vars::resolve_env(path);
        if !Path::new(&resolved).exists() {
            return Err(SchemeError::MissingFile {
                scheme: name.to_string(),
                path: PathBuf::from(resolved),
            });
        }
    }

    store.write(name, &role_paths.join(","))
}

/// Install a parsed scheme: validate every bound role's source, copy
/// cursor files not already at their per-role destination (or into
/// `install_path` when given), then register the positional path list.
pub fn install_from_scheme(
    store: &mut dyn SchemeStore,
    scheme: &Scheme,
    install_path: Option<&Path>,
) -> Result<(), SchemeError> {
    let mut copies: Vec<(PathBuf, PathBuf)> = Vec::new();
    let mut values: Vec<String> = Vec::with_capacity(ROLE_COUNT);

    for (_, entry) in scheme.iter() {
        let Some(destination) = &entry.destination else {
            values.push(String::new());
            continue;
        };
        let Some(source) = &entry.source else {
            // Declared in the config but not shipped beside it.
            let expected = destination
                .to_str()
                .and_then(vars::file_name)
                .map(|f| scheme.root.join(f))
                .unwrap_or_else(|| destination.clone());
            return Err(SchemeError::MissingFile {
                scheme: scheme.name.clone(),
                path: expected,
            });
        };

        let target = match install_path {
            Some(dir) => {
                let file = source.file_name().ok_or_else(|| {
                    SchemeError::Format(format!("not a file path: {}", source.display()))
                })?;
                dir.join(&scheme.name).join(file)
            }
            None => destination.clone(),
        };
        if source != &target && !target.exists() {
            copies.push((source.clone(), target.clone()));
        }
        values.push(target.display().to_string());
    }

    // Validation passed for every role; only now touch the filesystem.
    for (source, target) in &copies {
        fileops::copy_file(source, target)?;
    }

    install_scheme(store, &scheme.name, &values)
}

/// Delete a scheme and garbage-collect its exclusively-owned files.
///
/// Deletion attempts are not short-circuited: every eligible file is
/// tried, and any failures surface as one aggregate [`SchemeError::Delete`]
/// with the store record left in place for a retry.
pub fn delete_scheme(store: &mut dyn SchemeStore, name: &str) -> Result<(), SchemeError> {
    if let Some(current) = store.current()? {
        if current.name == name {
            return Err(SchemeError::InUse(name.to_string()));
        }
    }

    let Some(value) = store.read(name)? else {
        return Err(SchemeError::NotFound(name.to_string()));
    };

    let mine = resolved_files(&value);
    let mut others: BTreeSet<PathBuf> = BTreeSet::new();
    for record in store.list()? {
        if record.name != name {
            others.extend(resolved_files(&record.raw_value));
        }
    }

    let mut failed: Vec<PathBuf> = Vec::new();
    for file in mine.difference(&others) {
        if let Err(e) = fs::remove_file(file) {
            eprintln!("Failed to delete {}: {e}", file.display());
            failed.push(file.clone());
        }
    }
    if !failed.is_empty() {
        return Err(SchemeError::Delete {
            scheme: name.to_string(),
            failed,
        });
    }

    store.remove(name)?;
    Ok(())
}

/// Make an installed scheme the active one.
///
/// Reads the scheme's positional path list and hands it to the store's
/// `set_current`, which binds the live cursor settings to it (and changes
/// the cursor base size when `size` is given).
pub fn apply_scheme(
    store: &mut dyn SchemeStore,
    name: &str,
    size: Option<u32>,
) -> Result<(), SchemeError> {
    let Some(value) = store.read(name)? else {
        return Err(SchemeError::NotFound(name.to_string()));
    };
    let role_paths: Vec<String> = value.split(',').map(|v| v.trim().to_string()).collect();
    store.set_current(name, &role_paths, size)
}

/// Every record currently in the store.
pub fn list_schemes(store: &dyn SchemeStore) -> Result<Vec<SchemeRecord>, SchemeError> {
    store.list()
}

/// The store's active scheme, when one is set.
pub fn current_scheme(store: &dyn SchemeStore) -> Result<Option<CurrentScheme>, SchemeError> {
    store.current()
}

/// Resolve a stored path list to the set of files that exist on disk.
fn resolved_files(value: &str) -> BTreeSet<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(vars::resolve_env)
        .map(PathBuf::from)
        .filter(|p| p.is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory store double with the registry backend's semantics.
    struct MemoryStore {
        entries: Vec<(String, String)>,
        current: Option<String>,
        current_size: Option<u32>,
    }

    impl MemoryStore {
        fn new() -> Self {
            MemoryStore {
                entries: Vec::new(),
                current: None,
                current_size: Some(32),
            }
        }
    }

    impl SchemeStore for MemoryStore {
        fn list(&self) -> Result<Vec<SchemeRecord>, SchemeError> {
            Ok(self
                .entries
                .iter()
                .map(|(name, raw_value)| SchemeRecord {
                    name: name.clone(),
                    raw_value: raw_value.clone(),
                })
                .collect())
        }

        fn read(&self, name: &str) -> Result<Option<String>, SchemeError> {
            Ok(self
                .entries
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone()))
        }

        fn write(&mut self, name: &str, value: &str) -> Result<(), SchemeError> {
            if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
                entry.1 = value.to_string();
            } else {
                self.entries.push((name.to_string(), value.to_string()));
            }
            Ok(())
        }

        fn remove(&mut self, name: &str) -> Result<bool, SchemeError> {
            let before = self.entries.len();
            self.entries.retain(|(n, _)| n != name);
            Ok(self.entries.len() < before)
        }

        fn current(&self) -> Result<Option<CurrentScheme>, SchemeError> {
            Ok(self.current.clone().map(|name| CurrentScheme {
                name,
                size: self.current_size,
            }))
        }

        fn set_current(
            &mut self,
            name: &str,
            _role_paths: &[String],
            size: Option<u32>,
        ) -> Result<(), SchemeError> {
            self.current = Some(name.to_string());
            if size.is_some() {
                self.current_size = size;
            }
            Ok(())
        }
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"cur").unwrap();
        path
    }

    fn padded(paths: &[&Path]) -> Vec<String> {
        let mut values: Vec<String> = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        values.resize(ROLE_COUNT, String::new());
        values
    }

    #[test]
    fn test_install_requires_role_count_entries() {
        let mut store = MemoryStore::new();
        let err = install_scheme(&mut store, "Short", &["a".to_string()]).unwrap_err();
        assert!(matches!(err, SchemeError::Format(_)));
        assert!(store.entries.is_empty());
    }

    #[test]
    fn test_install_missing_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = touch(dir.path(), "arrow.cur");
        let missing = dir.path().join("missing.cur");
        let mut store = MemoryStore::new();

        let err =
            install_scheme(&mut store, "Test", &padded(&[&good, &missing])).unwrap_err();
        match err {
            SchemeError::MissingFile { scheme, path } => {
                assert_eq!(scheme, "Test");
                assert_eq!(path, missing);
            }
            other => panic!("expected MissingFile, got {other:?}"),
        }
        assert!(store.entries.is_empty());
    }

    #[test]
    fn test_install_writes_comma_joined_list() {
        let dir = tempfile::tempdir().unwrap();
        let arrow = touch(dir.path(), "arrow.cur");
        let mut store = MemoryStore::new();

        install_scheme(&mut store, "Test", &padded(&[&arrow])).unwrap();
        let value = store.read("Test").unwrap().unwrap();
        assert!(value.starts_with(&arrow.display().to_string()));
        assert_eq!(value.matches(',').count(), ROLE_COUNT - 1);
    }

    #[test]
    fn test_delete_active_scheme_rejected_and_store_unchanged() {
        let mut store = MemoryStore::new();
        store.write("Active", "whatever").unwrap();
        store.current = Some("Active".to_string());

        let err = delete_scheme(&mut store, "Active").unwrap_err();
        assert!(matches!(err, SchemeError::InUse(_)));
        assert!(store.read("Active").unwrap().is_some());
    }

    #[test]
    fn test_delete_unknown_scheme() {
        let mut store = MemoryStore::new();
        let err = delete_scheme(&mut store, "Ghost").unwrap_err();
        assert!(matches!(err, SchemeError::NotFound(_)));
    }

    #[test]
    fn test_delete_keeps_files_shared_with_other_schemes() {
        let dir = tempfile::tempdir().unwrap();
        let own = touch(dir.path(), "own.cur");
        let shared = touch(dir.path(), "shared.cur");
        let other = touch(dir.path(), "other.cur");

        let mut store = MemoryStore::new();
        store
            .write("First", &format!("{},{}", own.display(), shared.display()))
            .unwrap();
        store
            .write("Second", &format!("{},{}", shared.display(), other.display()))
            .unwrap();

        delete_scheme(&mut store, "First").unwrap();
        assert!(!own.exists());
        assert!(shared.exists(), "shared file must survive the first delete");
        assert!(store.read("First").unwrap().is_none());

        delete_scheme(&mut store, "Second").unwrap();
        assert!(!shared.exists(), "last owner takes the shared file with it");
        assert!(!other.exists());
        assert!(store.entries.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_aggregates_failures_and_keeps_record() {
        use std::os::unix::fs::{MetadataExt, PermissionsExt};

        let dir = tempfile::tempdir().unwrap();
        // Root ignores directory write permissions; there is no failure to
        // provoke, so only run with an unprivileged uid.
        if fs::metadata(dir.path()).unwrap().uid() == 0 {
            return;
        }
        let locked_dir = dir.path().join("locked");
        fs::create_dir(&locked_dir).unwrap();
        let locked = touch(&locked_dir, "stuck.cur");
        let free = touch(dir.path(), "free.cur");

        let mut store = MemoryStore::new();
        store
            .write("Doomed", &format!("{},{}", locked.display(), free.display()))
            .unwrap();

        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o555)).unwrap();
        let result = delete_scheme(&mut store, "Doomed");
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();

        match result.unwrap_err() {
            SchemeError::Delete { scheme, failed } => {
                assert_eq!(scheme, "Doomed");
                assert_eq!(failed, vec![locked.clone()]);
            }
            other => panic!("expected Delete, got {other:?}"),
        }
        // Everything deletable was deleted; the record stays for a retry.
        assert!(!free.exists());
        assert!(locked.exists());
        assert!(store.read("Doomed").unwrap().is_some());
    }

    #[test]
    fn test_apply_scheme_marks_current_and_sets_size() {
        let mut store = MemoryStore::new();
        store.write("Night", "a.cur,b.cur").unwrap();

        apply_scheme(&mut store, "Night", Some(48)).unwrap();
        let current = store.current().unwrap().unwrap();
        assert_eq!(current.name, "Night");
        assert_eq!(current.size, Some(48));

        // Applying without a size keeps the previous one.
        apply_scheme(&mut store, "Night", None).unwrap();
        assert_eq!(store.current().unwrap().unwrap().size, Some(48));
    }

    #[test]
    fn test_apply_unknown_scheme() {
        let mut store = MemoryStore::new();
        let err = apply_scheme(&mut store, "Ghost", None).unwrap_err();
        assert!(matches!(err, SchemeError::NotFound(_)));
        assert!(store.current().unwrap().is_none());
    }

    #[test]
    fn test_install_from_scheme_copies_into_custom_path() {
        let dir = tempfile::tempdir().unwrap();
        let src = touch(dir.path(), "arrow.cur");
        let install = dir.path().join("install");

        let mut scheme = Scheme::new("Custom", dir.path());
        let entry = scheme.entry_mut(crate::scheme::CursorRole::Arrow);
        entry.source = Some(src.clone());
        entry.destination = Some(src.clone());

        let mut store = MemoryStore::new();
        install_from_scheme(&mut store, &scheme, Some(&install)).unwrap();

        let copied = install.join("Custom").join("arrow.cur");
        assert!(copied.is_file());
        let value = store.read("Custom").unwrap().unwrap();
        assert!(value.starts_with(&copied.display().to_string()));
    }

    #[test]
    fn test_install_from_scheme_missing_source_copies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let install = dir.path().join("install");

        let mut scheme = Scheme::new("Broken", dir.path());
        let entry = scheme.entry_mut(crate::scheme::CursorRole::Arrow);
        entry.destination = Some(dir.path().join("arrow.cur"));
        // No source: the file is declared but absent beside the config.

        let mut store = MemoryStore::new();
        let err = install_from_scheme(&mut store, &scheme, Some(&install)).unwrap_err();
        match err {
            SchemeError::MissingFile { scheme, path } => {
                assert_eq!(scheme, "Broken");
                assert_eq!(path, dir.path().join("arrow.cur"));
            }
            other => panic!("expected MissingFile, got {other:?}"),
        }
        assert!(!install.exists());
        assert!(store.entries.is_empty());
    }
}
