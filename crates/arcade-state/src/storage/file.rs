//! File-backed storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::StorageError;
use crate::storage::StorageBackend;

/// Backend persisting all items as one JSON object of strings.
///
/// The file is read once on open and rewritten after every change, through a
/// temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            parse_items(&path, &text)?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), items = items.len(), "opened file storage");
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let obj: serde_json::Map<String, Value> = self
            .items
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let text = serde_json::to_string_pretty(&Value::Object(obj)).map_err(|e| {
            StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, text).map_err(|source| io_error(&temp_path, source))?;
        fs::rename(&temp_path, &self.path).map_err(|source| io_error(&self.path, source))?;
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn parse_items(path: &Path, text: &str) -> Result<BTreeMap<String, String>, StorageError> {
    let corrupt = |message: String| StorageError::Corrupt {
        path: path.display().to_string(),
        message,
    };

    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let value: Value = serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?;
    let Value::Object(obj) = value else {
        return Err(corrupt("top level is not an object".to_string()));
    };

    obj.into_iter()
        .map(|(key, item)| match item {
            Value::String(s) => Ok((key, s)),
            _ => Err(corrupt(format!("item '{key}' is not a string"))),
        })
        .collect()
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.flush()
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_persists_across_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item("gameNameList", "{\"__version\":2}").unwrap();
        storage.set_item("other", "1").unwrap();
        storage.remove_item("other").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.keys().unwrap(), vec!["gameNameList"]);
        assert_eq!(
            reopened.get_item("gameNameList").unwrap().as_deref(),
            Some("{\"__version\":2}")
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path().join("nested/store.json")).unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/store.json");
        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStorage::open(&path), Err(StorageError::Corrupt { .. })));

        fs::write(&path, "[]").unwrap();
        assert!(matches!(FileStorage::open(&path), Err(StorageError::Corrupt { .. })));

        fs::write(&path, "{\"k\": 1}").unwrap();
        let err = FileStorage::open(&path).unwrap_err();
        assert!(err.to_string().contains("'k'"));
    }
}
