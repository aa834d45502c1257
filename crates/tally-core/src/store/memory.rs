//! In-process storage for tests and throwaway sessions

use std::collections::HashMap;
use std::sync::RwLock;

use super::Storage;
use crate::error::{Error, Result};

/// `Storage` backed by a map; contents vanish with the value
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> Error {
    Error::InvalidData("memory storage lock poisoned".to_string())
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_many(&self, items: &[(&str, String)]) -> Result<()> {
        // One write guard covers every entry
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        for (key, value) in items {
            entries.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}
