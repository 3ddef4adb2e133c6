use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use anyhow::Result;

use crate::storage::area::StorageArea;

// In memory session storage
#[derive(Default, Clone)]
pub struct InMemorySessionStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything, as a browser does when the tab's session ends.
    pub fn end_session(&self) {
        log::debug!("session storage: session ended, dropping {} item(s)", self.len());
        self.data.write().unwrap().clear();
    }
}

impl StorageArea for InMemorySessionStorage {
    fn get_item(&self, k: &str) -> Option<String> {
        self.data.read().unwrap().get(k).cloned()
    }

    fn set_item(&self, k: &str, v: &str) -> Result<()> {
        self.data.write().unwrap().insert(k.to_string(), v.to_string());
        Ok(())
    }

    fn remove_item(&self, k: &str) -> Result<()> {
        self.data.write().unwrap().remove(k);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.data.write().unwrap().clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    fn keys(&self) -> Vec<String> {
        self.data.read().unwrap().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_session_drops_all_items() {
        let store = InMemorySessionStorage::new();
        let handle = store.clone();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();

        handle.end_session();

        assert!(store.is_empty());
        assert!(store.get_item("a").is_none());
    }
}
