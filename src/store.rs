//! Durable storage for the theme preference record.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::mode::ThemeMode;

/// Key-value storage for the single persisted preference.
///
/// Reads are fail-open: absent files, unreadable files and parse errors
/// all fold into `None`, which the controller treats as first-run. Writes
/// replace the record wholesale; there is nothing to merge.
pub trait PreferenceStore {
    /// Last explicitly chosen mode, or `None` when absent or unreadable.
    fn load(&self) -> Option<ThemeMode>;

    /// Replaces the preference record.
    fn save(&self, mode: ThemeMode) -> Result<(), ThemeError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Arc<S> {
    fn load(&self) -> Option<ThemeMode> {
        (**self).load()
    }

    fn save(&self, mode: ThemeMode) -> Result<(), ThemeError> {
        (**self).save(mode)
    }
}

/// On-disk record layout. A single scalar, no schema versioning.
#[derive(Debug, Serialize, Deserialize)]
struct PreferenceRecord {
    theme: ThemeMode,
}

/// Preference file under the per-user config directory.
///
/// [`FileStore::for_app`] resolves to `<config dir>/<app>/theme.toml`,
/// e.g. `~/.config/myapp/theme.toml` on Linux. When the host reports no
/// config directory the store still constructs: loads report absent and
/// saves fail, leaving the controller to run in memory for the session.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Option<PathBuf>,
}

impl FileStore {
    /// Store for the given application name.
    pub fn for_app(app: &str) -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join(app).join("theme.toml")),
        }
    }

    /// Store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Resolved path of the preference file, if the host has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Option<ThemeMode> {
        self.path
            .as_ref()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str::<PreferenceRecord>(&s).ok())
            .map(|record| record.theme)
    }

    fn save(&self, mode: ThemeMode) -> Result<(), ThemeError> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| ThemeError::Persist("could not determine config path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ThemeError::Persist(e.to_string()))?;
        }

        let record = PreferenceRecord { theme: mode };
        let toml =
            toml::to_string_pretty(&record).map_err(|e| ThemeError::Persist(e.to_string()))?;
        std::fs::write(path, toml).map_err(|e| ThemeError::Persist(e.to_string()))?;
        Ok(())
    }
}

/// In-process store for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<ThemeMode>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<ThemeMode> {
        *self.value.lock().unwrap()
    }

    fn save(&self, mode: ThemeMode) -> Result<(), ThemeError> {
        *self.value.lock().unwrap() = Some(mode);
        Ok(())
    }
}
