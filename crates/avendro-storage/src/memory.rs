//! In-process store

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::store::KeyValueStore;
use crate::Result;

/// Key-value store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Sorted list of stored keys
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn set_item_if_present(&self, key: &str, value: &str, required: &[&str]) -> Result<bool> {
        let mut items = self.items.write();
        if !required.iter().all(|k| items.contains_key(*k)) {
            return Ok(false);
        }

        items.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut items = self.items.write();
        for (key, value) in entries {
            items.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        let mut items = self.items.write();
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set_items(&[("x", "1"), ("y", "2")]).unwrap();
        assert_eq!(other.keys(), vec!["x", "y"]);

        other.remove_items(&["x", "y", "missing"]).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_conditional_write() {
        let store = MemoryStore::new();

        assert!(!store.set_item_if_present("token", "t1", &["owner"]).unwrap());
        assert!(store.is_empty());

        store.set_item("owner", "me").unwrap();
        assert!(store.set_item_if_present("token", "t1", &["owner"]).unwrap());
        assert_eq!(store.get_item("token").unwrap().as_deref(), Some("t1"));
    }
}
