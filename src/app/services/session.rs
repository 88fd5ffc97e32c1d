use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::app::infrastructure::error::{AppError, Result};

/// The list of open note filenames, persisted as a bare JSON array of
/// strings in tab order.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved filename list. A missing or malformed file is an empty
    /// session; this never fails.
    pub fn load(&self) -> Vec<String> {
        match self.try_load() {
            Ok(names) => names,
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file yet");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Ignoring session file: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`load`](Self::load) but reports why nothing could be read.
    pub fn try_load(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| AppError::MalformedSession(e.to_string()))
    }

    /// Overwrite the session file with `filenames`.
    pub fn save(&self, filenames: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(filenames)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("data").join("tabs_state.json"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(store_in(&tmp).load().is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SessionStore::new(tmp.path().join("tabs_state.json"));
        for junk in ["{oops", "{\"a\": 1}", "[1, 2]", ""] {
            fs::write(store.path(), junk).unwrap();
            assert!(store.load().is_empty(), "{junk:?}");
            assert!(matches!(store.try_load(), Err(AppError::MalformedSession(_))));
        }
    }

    #[test]
    fn test_written_format_is_plain_array() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);
        store.save(&["a.md".to_string(), "b.txt".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), r#"["a.md","b.txt"]"#);
    }

    #[test]
    fn test_save_of_load_is_fixed_point() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);
        store.save(&["x.md".to_string(), "y.md".to_string()]).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();
        store.save(&store.load()).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    proptest! {
        #[test]
        fn prop_load_returns_what_was_saved(names in prop::collection::vec("[^/\\\\]{0,12}", 0..8)) {
            let tmp = tempfile::tempdir().unwrap();
            let store = store_in(&tmp);
            store.save(&names).unwrap();
            prop_assert_eq!(store.load(), names);
        }
    }
}
