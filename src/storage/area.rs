use anyhow::Result;

/// Object-safe key/value storage area (DOM's Storage).
///
/// This is the store capability the plugin is handed: one implementation
/// per browser mechanism, plus in-memory fakes.
pub trait StorageArea: Send + Sync {
    /// Retrieves the value associated with the given key, or `None` if not found.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Sets the value for the given key, overwriting any existing value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the item with the given key. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Clears all items in the storage area.
    fn clear(&self) -> Result<()>;

    /// Returns the number of items in the storage area.
    fn len(&self) -> usize;

    /// Returns true when the area holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a vector of all keys in the storage area.
    fn keys(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{InMemoryCookieDocument, SessionCookieArea};
    use crate::storage::{InMemoryLocalStorage, InMemorySessionStorage};
    use std::sync::Arc;

    fn set(area: &Arc<dyn StorageArea>, k: &str, v: &str) {
        area.set_item(k, v).unwrap();
    }

    fn all_areas() -> Vec<(&'static str, Arc<dyn StorageArea>)> {
        vec![
            ("local", Arc::new(InMemoryLocalStorage::new()) as Arc<dyn StorageArea>),
            ("session", Arc::new(InMemorySessionStorage::new()) as Arc<dyn StorageArea>),
            (
                "cookie",
                Arc::new(SessionCookieArea::new(InMemoryCookieDocument::new())) as Arc<dyn StorageArea>,
            ),
        ]
    }

    #[test]
    fn storagearea_basic_contract() {
        for (name, area) in all_areas() {
            // starts empty
            assert_eq!(area.len(), 0, "{name}");
            assert!(area.is_empty(), "{name}");
            assert!(area.get_item("missing").is_none(), "{name}");

            // set + get
            set(&area, "a", "1");
            set(&area, "b", "2");
            assert_eq!(area.len(), 2, "{name}");
            assert_eq!(area.get_item("a").as_deref(), Some("1"), "{name}");
            assert_eq!(area.get_item("b").as_deref(), Some("2"), "{name}");

            // overwrite keeps len()
            set(&area, "a", "ONE");
            assert_eq!(area.len(), 2, "{name}");
            assert_eq!(area.get_item("a").as_deref(), Some("ONE"), "{name}");

            // remove, twice
            area.remove_item("b").unwrap();
            area.remove_item("b").unwrap();
            assert_eq!(area.len(), 1, "{name}");
            assert!(area.get_item("b").is_none(), "{name}");

            let mut keys = area.keys();
            keys.sort();
            assert_eq!(keys, vec!["a".to_string()], "{name}");

            // clear
            area.clear().unwrap();
            assert_eq!(area.len(), 0, "{name}");
            assert!(area.keys().is_empty(), "{name}");
        }
    }
}
