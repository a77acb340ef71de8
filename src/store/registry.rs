//! Windows registry backend for scheme records.
//!
//! Installed schemes live as string values under
//! `HKCU\Control Panel\Cursors\Schemes`, one value per scheme, with the
//! comma-joined role path list as the data. The active scheme name is the
//! default value of `HKCU\Control Panel\Cursors`.

use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_SET_VALUE};
use winreg::RegKey;

use crate::error::SchemeError;
use crate::scheme::CursorRole;
use crate::store::{CurrentScheme, SchemeRecord, SchemeStore};

const CURSORS_KEY: &str = r"Control Panel\Cursors";
const SCHEMES_KEY: &str = r"Control Panel\Cursors\Schemes";

/// Scheme store over the current user's registry hive.
pub struct RegistryStore;

impl RegistryStore {
    fn schemes_key(&self, write: bool) -> Result<RegKey, SchemeError> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let access = if write { KEY_READ | KEY_SET_VALUE } else { KEY_READ };
        let key = hkcu.open_subkey_with_flags(SCHEMES_KEY, access)?;
        Ok(key)
    }
}

impl SchemeStore for RegistryStore {
    fn list(&self) -> Result<Vec<SchemeRecord>, SchemeError> {
        let key = self.schemes_key(false)?;
        let mut records = Vec::new();
        for entry in key.enum_values() {
            let (name, _) = entry?;
            let raw_value: String = key.get_value(&name)?;
            records.push(SchemeRecord { name, raw_value });
        }
        Ok(records)
    }

    fn read(&self, name: &str) -> Result<Option<String>, SchemeError> {
        let key = self.schemes_key(false)?;
        match key.get_value::<String, _>(name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, name: &str, value: &str) -> Result<(), SchemeError> {
        let key = self.schemes_key(true)?;
        key.set_value(name, &value)?;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<bool, SchemeError> {
        let key = self.schemes_key(true)?;
        match key.delete_value(name) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn current(&self) -> Result<Option<CurrentScheme>, SchemeError> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let key = hkcu.open_subkey(CURSORS_KEY)?;
        let name: String = match key.get_value("") {
            Ok(name) => name,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if name.is_empty() {
            return Ok(None);
        }
        let size = key.get_value::<u32, _>("CursorBaseSize").ok();
        Ok(Some(CurrentScheme { name, size }))
    }

    fn set_current(
        &mut self,
        name: &str,
        role_paths: &[String],
        size: Option<u32>,
    ) -> Result<(), SchemeError> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (key, _) = hkcu.create_subkey(CURSORS_KEY)?;
        for (role, path) in CursorRole::ALL.into_iter().zip(role_paths) {
            key.set_value(role.spec().registry_value, path)?;
        }
        key.set_value("", &name)?;
        if let Some(size) = size {
            key.set_value("CursorBaseSize", &size)?;
        }
        refresh_system_cursors();
        Ok(())
    }
}

/// Tell the session to reload its cursors from the registry.
fn refresh_system_cursors() {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        SystemParametersInfoW, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SPI_SETCURSORS,
    };

    unsafe {
        SystemParametersInfoW(
            SPI_SETCURSORS,
            0,
            std::ptr::null_mut(),
            SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
        );
    }
}
