//! Learner preferences persisted between sessions.
//!
//! Values are plain strings keyed by name, stored in a small versioned JSON
//! document. Screens only read them; the settings screen is the writer.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::config::GameConfig;

/// `"false"` disables the toucan guide; anything else leaves it on.
pub const GUIDE_ENABLED_KEY: &str = "toucanGuideEnabled";
/// `"true"` marks a learner who already finished the tutorial.
pub const TUTORIAL_COMPLETED_KEY: &str = "tutorialCompleted";

const DOCUMENT_VERSION: u32 = 1;

/// Errors from preference storage.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported preference document version {0}")]
    Version(u32),

    #[error("Preference storage unavailable")]
    Unavailable,
}

/// String-keyed storage for learner preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PrefsDocument {
    version: u32,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

impl Default for PrefsDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            values: BTreeMap::new(),
        }
    }
}

/// Preferences kept in a JSON file on disk.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles from concurrent tasks.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PrefsDocument, PrefsError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(PrefsDocument::default()),
            Err(err) => return Err(err.into()),
        };
        let document: PrefsDocument = serde_json::from_str(&content)?;
        if document.version != DOCUMENT_VERSION {
            return Err(PrefsError::Version(document.version));
        }
        Ok(document)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        let _guard = self.lock.lock().map_err(|_| PrefsError::Unavailable)?;
        Ok(self.load()?.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let _guard = self.lock.lock().map_err(|_| PrefsError::Unavailable)?;
        let mut document = self.load()?;
        document.values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }
}

/// In-memory preferences, optionally refusing every access.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: Mutex::new(
                values
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
            ),
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        if self.unavailable {
            return Err(PrefsError::Unavailable);
        }
        let values = self.values.lock().map_err(|_| PrefsError::Unavailable)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        if self.unavailable {
            return Err(PrefsError::Unavailable);
        }
        let mut values = self.values.lock().map_err(|_| PrefsError::Unavailable)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Shared handle to the preference backend.
#[derive(Resource, Clone)]
pub struct Preferences(pub Arc<dyn PreferenceStore>);

/// The two flags the guide cares about, already interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidePreference {
    pub enabled: bool,
    pub first_time: bool,
}

impl GuidePreference {
    /// Used when the store cannot be read.
    pub const FAIL_OPEN: Self = Self {
        enabled: true,
        first_time: true,
    };

    pub fn from_values(enabled: Option<&str>, completed: Option<&str>) -> Self {
        Self {
            enabled: enabled != Some("false"),
            first_time: completed != Some("true"),
        }
    }
}

pub fn read_guide_preference(store: &dyn PreferenceStore) -> Result<GuidePreference, PrefsError> {
    let enabled = store.get(GUIDE_ENABLED_KEY)?;
    let completed = store.get(TUTORIAL_COMPLETED_KEY)?;
    Ok(GuidePreference::from_values(
        enabled.as_deref(),
        completed.as_deref(),
    ))
}

/// Reads the guide flags, treating any storage failure as "enabled".
pub fn load_guide_preference(store: &dyn PreferenceStore) -> GuidePreference {
    match read_guide_preference(store) {
        Ok(preference) => preference,
        Err(err) => {
            warn!("Could not read guide preference, keeping the guide on: {err}");
            GuidePreference::FAIL_OPEN
        }
    }
}

pub struct PrefsPlugin;

impl Plugin for PrefsPlugin {
    fn build(&self, app: &mut App) {
        let path = app
            .world()
            .get_resource::<GameConfig>()
            .map(|config| config.prefs_path.clone())
            .unwrap_or_else(|| GameConfig::default().prefs_path);
        let store = JsonFileStore::new(path);
        info!("Learner preferences stored at {}", store.path().display());
        app.insert_resource(Preferences(Arc::new(store)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tuki-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn only_literal_false_disables() {
        assert!(GuidePreference::from_values(None, None).enabled);
        assert!(GuidePreference::from_values(Some("true"), None).enabled);
        assert!(GuidePreference::from_values(Some("False"), None).enabled);
        assert!(!GuidePreference::from_values(Some("false"), None).enabled);
    }

    #[test]
    fn only_literal_true_marks_completion() {
        assert!(GuidePreference::from_values(None, None).first_time);
        assert!(GuidePreference::from_values(None, Some("yes")).first_time);
        assert!(!GuidePreference::from_values(None, Some("true")).first_time);
    }

    #[test]
    fn unavailable_store_fails_open() {
        let store = MemoryStore::unavailable();
        assert!(read_guide_preference(&store).is_err());
        assert_eq!(load_guide_preference(&store), GuidePreference::FAIL_OPEN);
    }

    #[test]
    fn memory_store_reads_flags() {
        let store = MemoryStore::with_values([
            (GUIDE_ENABLED_KEY, "false"),
            (TUTORIAL_COMPLETED_KEY, "true"),
        ]);
        assert_eq!(
            load_guide_preference(&store),
            GuidePreference {
                enabled: false,
                first_time: false,
            }
        );
    }

    #[test]
    fn file_store_missing_file_reads_empty() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert!(store.get(GUIDE_ENABLED_KEY).unwrap().is_none());
        assert_eq!(load_guide_preference(&store), GuidePreference::FAIL_OPEN);
    }

    #[test]
    fn file_store_persists_values() {
        let path = temp_path("persist");
        let store = JsonFileStore::new(&path);
        store.set(GUIDE_ENABLED_KEY, "false").unwrap();
        store.set(TUTORIAL_COMPLETED_KEY, "true").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get(GUIDE_ENABLED_KEY).unwrap().as_deref(),
            Some("false")
        );
        assert!(!load_guide_preference(&reopened).enabled);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn file_store_rejects_garbage() {
        let path = temp_path("garbage");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(GUIDE_ENABLED_KEY), Err(PrefsError::Json(_))));
        assert!(load_guide_preference(&store).enabled);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn file_store_rejects_future_versions() {
        let path = temp_path("version");
        std::fs::write(&path, r#"{"version": 7, "values": {}}"#).unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(GUIDE_ENABLED_KEY), Err(PrefsError::Version(7))));
        std::fs::remove_file(path).unwrap();
    }
}
