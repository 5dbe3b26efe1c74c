//! Directory-backed key/value storage.
//!
//! Each key maps to `<dir>/<key>.json`.  Writes go to a sibling temporary file
//! that is renamed over the target, so a crash mid-write leaves either the old
//! record or the new one, never a truncated file.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStorage, StorageError};

/// [`KeyValueStorage`] that keeps one file per key inside a directory.
///
/// The directory is created lazily on the first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`.  Nothing is touched on disk yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the records live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the file path for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] unless the key is non-empty, does
    /// not start with `.`, and consists only of ASCII letters, digits, `.`,
    /// `_` and `-`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = value.len(), "wrote storage record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("campus_storage_test_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_read_missing_key_returns_none() {
        let storage = FileStorage::new(temp_dir());
        assert!(storage.read("settings-storage").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trips_bytes() {
        // Arrange
        let dir = temp_dir();
        let storage = FileStorage::new(&dir);

        // Act
        storage.write("settings-storage", b"{\"a\":1}").unwrap();
        let read = storage.read("settings-storage").unwrap();

        // Assert
        assert_eq!(read.as_deref(), Some(&b"{\"a\":1}"[..]));
        assert!(dir.join("settings-storage.json").exists());
        assert!(
            !dir.join("settings-storage.json.tmp").exists(),
            "temporary file must be renamed away"
        );

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_overwrites_previous_value() {
        let dir = temp_dir();
        let storage = FileStorage::new(&dir);

        storage.write("k", b"first").unwrap();
        storage.write("k", b"second").unwrap();

        assert_eq!(storage.read("k").unwrap().as_deref(), Some(&b"second"[..]));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_creates_nested_directory() {
        let root = temp_dir();
        let dir = root.join("a").join("b");
        let storage = FileStorage::new(&dir);

        storage.write("k", b"v").unwrap();

        assert!(dir.is_dir());
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_path_like_keys_are_rejected() {
        let storage = FileStorage::new(temp_dir());
        for key in ["", "../escape", "a/b", ".hidden", "a\\b", "spa ce"] {
            assert!(
                matches!(storage.path_for(key), Err(StorageError::InvalidKey(_))),
                "key {key:?} must be rejected"
            );
            assert!(storage.write(key, b"x").is_err());
        }
    }

    #[test]
    fn test_path_for_appends_json_extension() {
        let storage = FileStorage::new("/tmp/campus");
        let path = storage.path_for("settings-storage").unwrap();
        assert!(path.ends_with("settings-storage.json"));
        assert_eq!(storage.dir(), Path::new("/tmp/campus"));
    }
}
