// src/settings/io.rs
//
// Plain string-per-key preference storage under the platform config
// directory. Values are decimal strings or the literals "true"/"false";
// absence or malformation degrades to the caller's default, and write
// failures are swallowed so a disabled config dir never interrupts review.
use bevy::log::{debug, info, warn};
use directories_next::ProjectDirs;
use std::fs;
use std::io;
use std::path::PathBuf;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "ReturnLens";
const APPLICATION: &str = "ReturnLensWorkspace";

/// Read/write access to the layout preference store. Injected so layout
/// logic is testable without touching the real config directory.
pub trait PrefStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> io::Result<()>;
}

/// One file per key under the platform config dir, file content the raw
/// value string.
#[derive(Debug, Default, Clone)]
pub struct FilePrefStore;

impl FilePrefStore {
    fn key_path(key: &str) -> io::Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
            let config_dir = proj_dirs.config_dir();
            fs::create_dir_all(config_dir)?;
            Ok(config_dir.join(format!("{}.pref", key)))
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine project directories for layout preferences.",
            ))
        }
    }
}

impl PrefStore for FilePrefStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = Self::key_path(key).ok()?;
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Prefs: failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        let path = Self::key_path(key)?;
        fs::write(&path, value)?;
        debug!("Prefs: wrote {}={}", key, value);
        Ok(())
    }
}

/// Reads a stored integer, falling back to `default` when the value is
/// absent, non-numeric, or outside `[min, max]`.
pub fn load_bounded(store: &dyn PrefStore, key: &str, min: i32, max: i32, default: i32) -> i32 {
    match store.read(key) {
        Some(raw) => match raw.parse::<i32>() {
            Ok(value) if (min..=max).contains(&value) => value,
            Ok(value) => {
                info!(
                    "Prefs: '{}' value {} outside [{}, {}]; using default {}.",
                    key, value, min, max, default
                );
                default
            }
            Err(_) => {
                info!("Prefs: '{}' value '{}' not numeric; using default {}.", key, raw, default);
                default
            }
        },
        None => default,
    }
}

/// Reads a stored boolean flag. Anything other than the literal "true" or
/// "false" falls back to the default.
pub fn load_flag(store: &dyn PrefStore, key: &str, default: bool) -> bool {
    match store.read(key).as_deref() {
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            info!("Prefs: '{}' value '{}' not a flag; using default {}.", key, other, default);
            default
        }
        None => default,
    }
}

/// Best-effort save. Failures are logged and swallowed; the preference
/// simply does not persist for this session.
pub fn save(store: &dyn PrefStore, key: &str, value: i32) {
    if let Err(e) = store.write(key, &value.to_string()) {
        warn!("Prefs: failed to save '{}': {}", key, e);
    }
}

pub fn save_flag(store: &dyn PrefStore, key: &str, value: bool) {
    if let Err(e) = store.write(key, if value { "true" } else { "false" }) {
        warn!("Prefs: failed to save '{}': {}", key, e);
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory store for tests; `fail_writes` simulates disabled storage.
    #[derive(Default)]
    pub struct MemoryPrefStore {
        pub values: RefCell<HashMap<String, String>>,
        pub fail_writes: bool,
    }

    impl PrefStore for MemoryPrefStore {
        fn read(&self, key: &str) -> Option<String> {
            self.values.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: &str) -> io::Result<()> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "storage disabled"));
            }
            self.values.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn load_bounded_accepts_in_range_values() {
        let store = MemoryPrefStore::default();
        store.write("x", "250").unwrap();
        assert_eq!(load_bounded(&store, "x", 80, 400, 200), 250);
    }

    #[test]
    fn load_bounded_falls_back_on_bad_values() {
        let store = MemoryPrefStore::default();
        assert_eq!(load_bounded(&store, "x", 80, 400, 200), 200);

        store.write("x", "9999").unwrap();
        assert_eq!(load_bounded(&store, "x", 80, 400, 200), 200);

        store.write("x", "abc").unwrap();
        assert_eq!(load_bounded(&store, "x", 80, 400, 200), 200);
    }

    #[test]
    fn load_bounded_accepts_boundary_values() {
        let store = MemoryPrefStore::default();
        store.write("x", "80").unwrap();
        assert_eq!(load_bounded(&store, "x", 80, 400, 200), 80);
        store.write("x", "400").unwrap();
        assert_eq!(load_bounded(&store, "x", 80, 400, 200), 400);
    }

    #[test]
    fn flags_only_accept_literal_booleans() {
        let store = MemoryPrefStore::default();
        assert!(!load_flag(&store, "min", false));
        store.write("min", "true").unwrap();
        assert!(load_flag(&store, "min", false));
        store.write("min", "TRUE").unwrap();
        assert!(!load_flag(&store, "min", false));
    }

    #[test]
    fn failed_writes_are_swallowed() {
        let store = MemoryPrefStore { fail_writes: true, ..Default::default() };
        // Must not panic; the value simply is not persisted.
        save(&store, "x", 250);
        save_flag(&store, "min", true);
        assert!(store.values.borrow().is_empty());
    }
}
