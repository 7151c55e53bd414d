//! Durable key-value persistence for the inventory.

use crate::error::Result;
use crate::types::Item;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key-value persistence for the inventory collection.
///
/// One entry per key, stored as a file named after the key inside the
/// store directory. The value is the full collection as a UTF-8 JSON
/// array. There is no version field; format changes are breaking.
pub struct ItemStore {
    /// Base directory for entries.
    path: PathBuf,

    /// Namespaced entry key.
    key: String,
}

impl ItemStore {
    /// Create an item store rooted at the given directory.
    pub fn new(path: impl AsRef<Path>, key: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;

        Ok(Self {
            path,
            key: key.into(),
        })
    }

    /// Write an empty collection if no entry exists under the key yet.
    ///
    /// Idempotent; runs on every open so first reads see `[]` instead of
    /// a missing entry.
    pub fn initialize(&self) -> Result<()> {
        if !self.entry_path().exists() {
            self.write(&[])?;
        }
        Ok(())
    }

    /// Read the full collection.
    ///
    /// A missing, unreadable, or malformed entry degrades to the empty
    /// collection so callers always have something renderable. The
    /// failure is logged here and never propagated.
    pub fn read(&self) -> Vec<Item> {
        let entry = self.entry_path();

        let bytes = match fs::read(&entry) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(key = %self.key, "no inventory entry, treating as empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "inventory entry unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                warn!(key = %self.key, error = %e, "inventory entry malformed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Persist the full collection, replacing the previous value.
    ///
    /// The bytes land in a temp sibling first and are renamed over the
    /// entry, so a crash mid-write leaves the old value intact and a
    /// reader never observes a partial one.
    pub fn write(&self, items: &[Item]) -> Result<()> {
        let bytes = serde_json::to_vec(items)?;

        // Writes are serialized by the repository, so a fixed temp name
        // cannot collide.
        let tmp = self.path.join(format!(".{}.tmp", self.key));
        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;

        fs::rename(&tmp, self.entry_path())?;
        Ok(())
    }

    /// Size of the persisted entry in bytes (0 when absent).
    pub fn entry_size(&self) -> u64 {
        fs::metadata(self.entry_path()).map(|m| m.len()).unwrap_or(0)
    }

    /// Full path of the entry file.
    pub fn entry_path(&self) -> PathBuf {
        self.path.join(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemId;

    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ItemStore {
        ItemStore::new(dir.path().join("store"), "inventory").unwrap()
    }

    fn item(id: &str, name: &str) -> Item {
        Item {
            id: ItemId(id.into()),
            name: name.into(),
            image: None,
        }
    }

    #[test]
    fn test_initialize_writes_empty_array() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.initialize().unwrap();

        let raw = fs::read_to_string(store.entry_path()).unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_initialize_preserves_existing_data() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.write(&[item("1", "Kettle")]).unwrap();
        store.initialize().unwrap();

        assert_eq!(store.read(), vec![item("1", "Kettle")]);
    }

    #[test]
    fn test_read_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert!(store.read().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let items = vec![
            item("1", "Kettle"),
            Item {
                id: ItemId("2".into()),
                name: "Чайник ☕".into(),
                image: Some("file:///photos/kettle.jpg".into()),
            },
        ];
        store.write(&items).unwrap();

        assert_eq!(store.read(), items);
    }

    #[test]
    fn test_write_replaces_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.write(&[item("1", "old")]).unwrap();
        store.write(&[item("2", "new")]).unwrap();

        assert_eq!(store.read(), vec![item("2", "new")]);
    }

    #[test]
    fn test_read_corrupt_entry_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.write(&[item("1", "Kettle")]).unwrap();
        fs::write(store.entry_path(), b"{not json").unwrap();

        assert!(store.read().is_empty());
    }

    #[test]
    fn test_read_wrong_shape_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        fs::write(store.entry_path(), br#"{"inventory": []}"#).unwrap();

        assert!(store.read().is_empty());
    }

    #[test]
    fn test_read_defaults_missing_fields() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        fs::write(store.entry_path(), br#"[{"id":"123"}]"#).unwrap();

        let items = store.read();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ItemId("123".into()));
        assert_eq!(items[0].name, "");
        assert_eq!(items[0].image, None);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.write(&[item("1", "Kettle")]).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path().join("store"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["inventory".to_string()]);
    }
}
