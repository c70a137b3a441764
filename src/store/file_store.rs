use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::utils::{file_utils, logger};

/// Key-value store persisted as one JSON object of string values.
///
/// The whole file is rewritten on every `set`/`remove`.
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match file_utils::read_optional(&path)? {
            None => BTreeMap::new(),
            Some(content) if content.trim().is_empty() => BTreeMap::new(),
            Some(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(err) => {
                    logger::error(&format!(
                        "store {} is unreadable, starting empty: {}",
                        path.display(),
                        err
                    ));
                    BTreeMap::new()
                }
            },
        };

        logger::debug(&format!("opened store {} ({} keys)", path.display(), values.len()));
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.values).context("failed to serialize store")?;
        file_utils::write_atomic(&self.path, content.as_bytes())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "\"dark\"").unwrap();
        store.set("pixelfinity-grid-size", "{\"width\":8,\"height\":8}").unwrap();
        store.remove("missing").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("\"dark\""));
        assert_eq!(reopened.keys(), ["pixelfinity-grid-size", "theme"]);
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_until_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert!(store.keys().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");

        store.set("theme", "\"light\"").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("\"light\""));
    }
}
