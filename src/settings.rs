//! Local settings
//!
//! Read from an optional JSON file (`pig_settings.json`) in the working
//! directory. Missing or broken files fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_RECORD_PATH;
use crate::sim::Die;

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the in-progress game is recorded
    pub record_path: PathBuf,
    /// Fixed die seed for reproducible games (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            record_path: PathBuf::from(DEFAULT_RECORD_PATH),
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Die for this run
    pub fn die(&self) -> Die {
        match self.seed {
            Some(seed) => {
                log::info!("Rolling with fixed seed {seed}");
                Die::seeded(seed)
            }
            None => Die::random(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Dice;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.record_path, PathBuf::from("game_data.txt"));
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 99 }"#).unwrap();
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.record_path, PathBuf::from(DEFAULT_RECORD_PATH));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("pig_settings_does_not_exist.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("pig_settings_broken_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_seed_makes_die_reproducible() {
        let settings = Settings {
            seed: Some(2024),
            ..Default::default()
        };
        let mut a = settings.die();
        let mut b = settings.die();
        for _ in 0..10 {
            assert_eq!(a.roll(), b.roll());
        }
    }
}
