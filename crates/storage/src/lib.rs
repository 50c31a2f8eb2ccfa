use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use shared::domain::ThemePreference;

pub const THEME_STORAGE_KEY: &str = "theme";
const APP_DIR_NAME: &str = "resume_eval";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// String key-value persistence for user preferences.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>>;
    fn set_string(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        (**self).get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_string(key, value)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as one flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read preferences '{}'", self.path.display())
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str::<Map<String, Value>>(&raw)
            .with_context(|| format!("malformed preferences file '{}'", self.path.display()))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            tracing::warn!("discarding unreadable preferences: {err:#}");
            Map::new()
        });
        entries.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create preferences directory '{}'", parent.display())
                })?;
            }
        }
        let serialized = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("failed to write preferences '{}'", self.path.display()))?;
        Ok(())
    }
}

/// `<config dir>/resume_eval/preferences.json`, when the platform has a config dir.
pub fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME))
}

/// Opens the preference store at `path`, falling back to the platform default
/// and finally to an in-memory store that forgets everything on exit.
pub fn open_preferences(path: Option<&Path>) -> Box<dyn KeyValueStore + Send> {
    match path.map(Path::to_path_buf).or_else(default_preferences_path) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using file-backed preferences");
            Box::new(FileKeyValueStore::new(path))
        }
        None => {
            tracing::warn!("no config directory available; preferences will not persist");
            Box::new(MemoryKeyValueStore::new())
        }
    }
}

/// Loads and persists the light/dark preference. Storage problems never
/// surface to callers.
pub struct ThemeStore<S> {
    store: S,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> ThemePreference {
        match self.store.get_string(THEME_STORAGE_KEY) {
            Ok(Some(label)) => ThemePreference::from_label(&label).unwrap_or_else(|| {
                tracing::debug!(label = %label, "ignoring unrecognized stored theme");
                ThemePreference::default()
            }),
            Ok(None) => ThemePreference::default(),
            Err(err) => {
                tracing::debug!("theme preference unavailable: {err:#}");
                ThemePreference::default()
            }
        }
    }

    pub fn toggle(&mut self, current: ThemePreference) -> ThemePreference {
        let updated = current.toggled();
        if let Err(err) = self.store.set_string(THEME_STORAGE_KEY, updated.as_str()) {
            tracing::warn!(theme = %updated, "failed to persist theme preference: {err:#}");
        }
        updated
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
