// Runtime configuration read from the environment.
use bevy::prelude::*;
use std::path::PathBuf;

const PREFS_PATH_VAR: &str = "TUKI_PREFS_PATH";
const SHUFFLE_VAR: &str = "TUKI_SHUFFLE_ITEMS";
const DEFAULT_PREFS_PATH: &str = "tuki_prefs.json";

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// JSON document holding the learner's preferences.
    pub prefs_path: PathBuf,
    /// Present level items in a random order.
    pub shuffle_items: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
            shuffle_items: true,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            prefs_path: lookup(PREFS_PATH_VAR)
                .filter(|path| !path.trim().is_empty())
                .map_or(defaults.prefs_path, PathBuf::from),
            shuffle_items: lookup(SHUFFLE_VAR).map_or(defaults.shuffle_items, |value| {
                !matches!(value.trim(), "0" | "false" | "no" | "off")
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        assert_eq!(GameConfig::from_lookup(|_| None), GameConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = GameConfig::from_lookup(|key| match key {
            PREFS_PATH_VAR => Some("/tmp/learner.json".to_string()),
            SHUFFLE_VAR => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.prefs_path, PathBuf::from("/tmp/learner.json"));
        assert!(!config.shuffle_items);
    }

    #[test]
    fn blank_path_falls_back() {
        let config = GameConfig::from_lookup(|key| {
            (key == PREFS_PATH_VAR).then(|| "  ".to_string())
        });
        assert_eq!(config.prefs_path, PathBuf::from(DEFAULT_PREFS_PATH));
        assert!(config.shuffle_items);
    }
}
