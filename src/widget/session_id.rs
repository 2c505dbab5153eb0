// src/widget/session_id.rs
//! Pseudo-user identifier persisted in key/value storage.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use thiserror::Error;
use uuid::Uuid;

pub const STORAGE_KEY: &str = "mm_user";
pub const ID_PREFIX: &str = "user_";
const ID_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String key/value store the widget keeps its identity in.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut items) => items.remove(key),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "unreadable storage: {}", e);
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking the write.
        let mut items = self.load().unwrap_or_default();
        items.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&items)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdManager {
    id: String,
}

impl SessionIdManager {
    /// Load the stored identifier, creating and storing one if absent.
    pub fn init(storage: &impl Storage) -> Result<Self, StorageError> {
        if let Some(id) = storage.get_item(STORAGE_KEY) {
            return Ok(Self { id });
        }
        let id = generate_id();
        storage.set_item(STORAGE_KEY, &id)?;
        tracing::debug!(user_id = %id, "created chat user id");
        Ok(Self { id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

pub fn generate_id() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(ID_PREFIX.len() + ID_LEN);
    id.push_str(ID_PREFIX);
    for _ in 0..ID_LEN {
        id.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_prefix_and_six_base36_chars() {
        for _ in 0..50 {
            let id = generate_id();
            let suffix = id.strip_prefix(ID_PREFIX).unwrap();
            assert_eq!(suffix.len(), 6);
            assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn init_is_stable_for_same_storage() {
        let storage = MemoryStorage::new();
        let first = SessionIdManager::init(&storage).unwrap();
        let second = SessionIdManager::init(&storage).unwrap();
        assert_eq!(first.id(), second.id());
        assert_eq!(storage.get_item(STORAGE_KEY).as_deref(), Some(first.id()));
    }

    #[test]
    fn existing_value_is_not_validated_or_rotated() {
        let storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "whatever").unwrap();
        let mgr = SessionIdManager::init(&storage).unwrap();
        assert_eq!(mgr.id(), "whatever");
    }

    #[test]
    fn file_storage_survives_reopen() {
        let path = std::env::temp_dir()
            .join(format!("mm-storage-{}", Uuid::new_v4()))
            .join("storage.json");
        let first = SessionIdManager::init(&FileStorage::new(&path)).unwrap();
        let second = SessionIdManager::init(&FileStorage::new(&path)).unwrap();
        assert_eq!(first, second);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
