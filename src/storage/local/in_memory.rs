use crate::storage::area::StorageArea;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for `localStorage` (no persistence).
///
/// Clones share the same map, the way every script on an origin sees the
/// same `localStorage` object.
#[derive(Default, Clone)]
pub struct InMemoryLocalStorage {
    map: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageArea for InMemoryLocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.map.lock().unwrap().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.map.lock().unwrap().clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.map.lock().unwrap().len()
    }

    fn keys(&self) -> Vec<String> {
        let mut v: Vec<String> = self.map.lock().unwrap().keys().cloned().collect();
        v.sort_unstable(); // deterministic enumeration order
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = InMemoryLocalStorage::new();
        let b = a.clone();

        a.set_item("k", "v").unwrap();
        assert_eq!(b.get_item("k").as_deref(), Some("v"));

        b.remove_item("k").unwrap();
        assert!(a.get_item("k").is_none());
    }

    #[test]
    fn separate_instances_isolate() {
        let a = InMemoryLocalStorage::new();
        let b = InMemoryLocalStorage::new();

        a.set_item("k", "v").unwrap();
        assert!(b.get_item("k").is_none());
    }

    #[test]
    fn keys_are_sorted() {
        let area = InMemoryLocalStorage::new();
        area.set_item("c", "3").unwrap();
        area.set_item("a", "1").unwrap();
        area.set_item("b", "2").unwrap();
        assert_eq!(area.keys(), vec!["a", "b", "c"]);
    }
}
