use super::area::StorageArea;
use super::types::StorageAdapter;
use crate::config::CookieConfig;
use crate::cookies::{InMemoryCookieDocument, SessionCookieArea};
use crate::storage::{InMemoryLocalStorage, InMemorySessionStorage};
use std::fmt::Debug;
use std::sync::Arc;

/// Handles to the three storage areas the plugin can write to.
///
/// The local area doubles as the home of the adapter preference, whatever
/// adapter is active.
#[derive(Clone)]
pub struct StorageBackends {
    /// Persistent area (`localStorage`).
    pub local: Arc<dyn StorageArea>,
    /// Tab-scoped area (`sessionStorage`).
    pub session: Arc<dyn StorageArea>,
    /// Cookie-backed session area.
    pub cookie: Arc<dyn StorageArea>,
}

impl Debug for StorageBackends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackends").finish_non_exhaustive()
    }
}

impl StorageBackends {
    pub fn new(
        local: Arc<dyn StorageArea>,
        session: Arc<dyn StorageArea>,
        cookie: Arc<dyn StorageArea>,
    ) -> Self {
        Self { local, session, cookie }
    }

    /// Fresh in-memory areas for all three adapters.
    pub fn in_memory(cookie_config: CookieConfig) -> Self {
        Self::new(
            Arc::new(InMemoryLocalStorage::new()),
            Arc::new(InMemorySessionStorage::new()),
            Arc::new(SessionCookieArea::with_config(
                InMemoryCookieDocument::new(),
                cookie_config,
            )),
        )
    }

    /// The area backing `adapter`.
    pub fn area(&self, adapter: StorageAdapter) -> &Arc<dyn StorageArea> {
        match adapter {
            StorageAdapter::LocalStorage => &self.local,
            StorageAdapter::SessionStorage => &self.session,
            StorageAdapter::SessionCookie => &self.cookie,
        }
    }

    /// Reads the adapter preference stored under `adapter_key` in the local area.
    ///
    /// Never fails: a missing or unrecognized preference selects local storage.
    pub fn preference(&self, adapter_key: &str) -> StorageAdapter {
        let raw = self.local.get_item(adapter_key);
        let adapter = StorageAdapter::from_preference(raw.as_deref());
        if let Some(raw) = raw.as_deref() {
            if raw != adapter.as_str() {
                log::warn!("unrecognized storage adapter preference {raw:?}, using {adapter}");
            }
        }
        adapter
    }

    /// Resolves the active area from the stored preference.
    pub fn resolve(&self, adapter_key: &str) -> (StorageAdapter, &Arc<dyn StorageArea>) {
        let adapter = self.preference(adapter_key);
        log::debug!("active storage adapter: {adapter}");
        (adapter, self.area(adapter))
    }
}
