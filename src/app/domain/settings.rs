use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::app::infrastructure::error::AppError;
use crate::app::services::haiku::HaikuRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Where notes, the session file and the resource files live.
    /// `None` means `<platform data dir>/notator`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_state_file")]
    pub state_file: String,

    #[serde(default = "default_quotes_file")]
    pub quotes_file: String,

    #[serde(default = "default_haiku_file")]
    pub haiku_file: String,

    #[serde(default)]
    pub haiku_rule: HaikuRule,

    #[serde(default = "default_max_timer_minutes")]
    pub max_timer_minutes: u32,

    #[serde(default = "default_tabs_visible")]
    pub tabs_visible: bool,

    /// Extension proposed by the Save As dialog (without the dot)
    #[serde(default = "default_extension")]
    pub default_extension: String,
}

fn default_state_file() -> String {
    "tabs_state.json".to_string()
}

fn default_quotes_file() -> String {
    "quotes.txt".to_string()
}

fn default_haiku_file() -> String {
    "haiku.txt".to_string()
}

fn default_max_timer_minutes() -> u32 {
    120
}

fn default_tabs_visible() -> bool {
    true
}

fn default_extension() -> String {
    "md".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            state_file: default_state_file(),
            quotes_file: default_quotes_file(),
            haiku_file: default_haiku_file(),
            haiku_rule: HaikuRule::default(),
            max_timer_minutes: default_max_timer_minutes(),
            tabs_visible: default_tabs_visible(),
            default_extension: default_extension(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(path = %config_path.display(), "Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // First run: write the defaults so the user has a file to edit
                let default = Self::default();
                if let Err(e) = default.save_to(config_path) {
                    warn!("Could not write default settings: {}", e);
                }
                default
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("notator");
        path.push("settings.json");
        path
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => {
                let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
                path.push("notator");
                path
            }
        }
    }
}

/// Every filesystem location the app touches, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub state_file: PathBuf,
    pub quotes_file: PathBuf,
    pub haiku_file: PathBuf,
}

impl AppPaths {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::in_dir(settings.resolve_data_dir(), settings)
    }

    pub fn in_dir(data_dir: PathBuf, settings: &AppSettings) -> Self {
        Self {
            state_file: data_dir.join(&settings.state_file),
            quotes_file: data_dir.join(&settings.quotes_file),
            haiku_file: data_dir.join(&settings.haiku_file),
            data_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.state_file, "tabs_state.json");
        assert_eq!(settings.quotes_file, "quotes.txt");
        assert_eq!(settings.haiku_file, "haiku.txt");
        assert_eq!(settings.haiku_rule, HaikuRule::WordRanges);
        assert_eq!(settings.max_timer_minutes, 120);
        assert!(settings.tabs_visible);
        assert!(settings.data_dir.is_none());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"tabs_visible": false, "haiku_rule": "StrictSyllables"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert!(!settings.tabs_visible);
        assert_eq!(settings.haiku_rule, HaikuRule::StrictSyllables);
        assert_eq!(settings.max_timer_minutes, 120);
    }

    #[test]
    fn test_load_missing_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        let settings = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_paths_follow_data_dir() {
        let settings = AppSettings {
            data_dir: Some(PathBuf::from("/tmp/notes")),
            ..Default::default()
        };
        let paths = AppPaths::from_settings(&settings);
        assert_eq!(paths.data_dir, PathBuf::from("/tmp/notes"));
        assert_eq!(paths.state_file, PathBuf::from("/tmp/notes/tabs_state.json"));
        assert_eq!(paths.quotes_file, PathBuf::from("/tmp/notes/quotes.txt"));
        assert_eq!(paths.haiku_file, PathBuf::from("/tmp/notes/haiku.txt"));
    }
}
