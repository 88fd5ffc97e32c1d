use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};

/// Note files, all kept flat inside one data directory.
///
/// Filenames are bare basenames; anything that would escape the directory
/// is rejected with [`AppError::InvalidFilename`].
#[derive(Debug, Clone)]
pub struct NoteStore {
    dir: PathBuf,
}

impl NoteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        let bad = filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\'])
            || filename.contains(std::path::MAIN_SEPARATOR);
        if bad {
            return Err(AppError::InvalidFilename(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path_for(filename).map(|p| p.is_file()).unwrap_or(false)
    }

    pub fn read(&self, filename: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path_for(filename)?)?)
    }

    pub fn write(&self, filename: &str, text: &str) -> Result<()> {
        let path = self.path_for(filename)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn remove(&self, filename: &str) -> Result<()> {
        let path = self.path_for(filename)?;
        fs::remove_file(path).map_err(|source| AppError::DeleteFailed {
            filename: filename.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_directory_and_reads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let store = NoteStore::new(tmp.path().join("data"));
        store.write("a.md", "hello").unwrap();
        assert!(store.exists("a.md"));
        assert_eq!(store.read("a.md").unwrap(), "hello");
    }

    #[test]
    fn test_rejects_paths() {
        let store = NoteStore::new("data");
        for name in ["", ".", "..", "../x.md", "sub/x.md", "sub\\x.md"] {
            assert!(
                matches!(store.path_for(name), Err(AppError::InvalidFilename(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(!store.exists("../x.md"));
    }

    #[test]
    fn test_remove_missing_is_delete_failed() {
        let tmp = tempfile::tempdir().unwrap();
        let store = NoteStore::new(tmp.path());
        let err = store.remove("gone.md").unwrap_err();
        assert!(matches!(err, AppError::DeleteFailed { ref filename, .. } if filename == "gone.md"));
    }

    #[test]
    fn test_remove_deletes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = NoteStore::new(tmp.path());
        store.write("x.txt", "bye").unwrap();
        store.remove("x.txt").unwrap();
        assert!(!store.exists("x.txt"));
    }
}
