use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

use super::KeyValueStore;

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    label: String,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let label = dir.display().to_string();
        Self { dir, label }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        &self.label
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a sibling temp file and renames it into place, so readers see
    /// either the old value or the new one.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&staging, value)?;
        std::fs::rename(&staging, &target)?;
        debug!(path = %target.display(), bytes = value.len(), "wrote store value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("colors").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = FileStore::new(&nested);

        store.set("apiColors", "[]").unwrap();

        let path = nested.join("apiColors.json");
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
        assert!(!nested.join(".apiColors.json.tmp").exists());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("colorMixes", "first").unwrap();
        store.set("colorMixes", "second").unwrap();
        assert_eq!(store.get("colorMixes").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn keys_do_not_share_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("colors", "a").unwrap();
        store.set("apiColors", "b").unwrap();
        assert_eq!(store.get("colors").unwrap().as_deref(), Some("a"));
        assert_eq!(store.get("apiColors").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the value file should be
        std::fs::create_dir_all(dir.path().join("colors.json")).unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("colors").is_err());
    }
}
