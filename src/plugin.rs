//! The secure storage plugin's web implementation.
//!
//! [`SecureStoragePlugin`] exposes the plugin's operations over whichever
//! [`StorageArea`](crate::storage::StorageArea) the stored adapter
//! preference selects. Every managed key carries the configured prefix
//! (`cap_sec_` by default) so the plugin can share a storage area with
//! unrelated data.
//!
//! Values are base64 encoded, **not encrypted**. Browsers have no secure
//! enclave reachable from a page; this backend only provides parity with
//! the native ones.
//!
//! All operations are `async` for interface parity with the native
//! backends. They complete without ever suspending.

use crate::config::PluginConfig;
use crate::errors::{Result, SecureStorageError};
use crate::storage::{codec, Accessibility, StorageAdapter, StorageArea, StorageBackends};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SecureStoragePlugin {
    config: PluginConfig,
    backends: StorageBackends,
}

impl SecureStoragePlugin {
    pub fn new(config: PluginConfig, backends: StorageBackends) -> Self {
        Self { config, backends }
    }

    /// A plugin over fresh in-memory areas, with the default config.
    pub fn in_memory() -> Self {
        let config = PluginConfig::default();
        let backends = StorageBackends::in_memory(config.cookie.clone());
        Self::new(config, backends)
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn backends(&self) -> &StorageBackends {
        &self.backends
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.config.key_prefix, key)
    }

    /// User keys that land on the adapter preference entry.
    fn warn_if_preference(&self, key: &str) {
        if self.prefixed(key) == self.config.adapter_key {
            log::warn!(
                "key {key:?} shares its storage entry with the adapter preference ({})",
                self.config.adapter_key
            );
        }
    }

    fn active(&self) -> (StorageAdapter, &Arc<dyn StorageArea>) {
        self.backends.resolve(&self.config.adapter_key)
    }

    /// Selects the area used by subsequent calls. The preference always
    /// lives in the local area.
    pub async fn set_storage_adapter(&self, adapter: StorageAdapter) -> Result<()> {
        log::debug!("set_storage_adapter: {adapter}");
        self.backends
            .local
            .set_item(&self.config.adapter_key, adapter.as_str())
            .inspect_err(|e| log::error!("cannot store adapter preference: {e:#}"))?;
        Ok(())
    }

    pub async fn get_storage_adapter(&self) -> StorageAdapter {
        self.backends.preference(&self.config.adapter_key)
    }

    pub async fn get(&self, key: &str) -> Result<String> {
        let (adapter, area) = self.active();
        log::debug!("get {key:?} from {adapter}");

        let Some(stored) = area.get_item(&self.prefixed(key)) else {
            return Err(SecureStorageError::NotFound { key: key.to_string() });
        };

        codec::decode(&stored).map_err(|source| {
            log::warn!("stored value for {key:?} in {adapter} is not valid base64");
            SecureStorageError::Corrupted { key: key.to_string(), source }
        })
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let (adapter, area) = self.active();
        log::debug!("set {key:?} in {adapter}");
        self.warn_if_preference(key);
        area.set_item(&self.prefixed(key), &codec::encode(value))
            .inspect_err(|e| log::error!("cannot store {key:?} in {adapter}: {e:#}"))?;
        Ok(())
    }

    /// Removes `key`. Removing a missing key succeeds.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let (adapter, area) = self.active();
        log::debug!("remove {key:?} from {adapter}");
        self.warn_if_preference(key);
        area.remove_item(&self.prefixed(key))
            .inspect_err(|e| log::error!("cannot remove {key:?} from {adapter}: {e:#}"))?;
        Ok(())
    }

    /// Removes every prefixed key from the active area, then drops the
    /// adapter preference from the local area, whichever area is active.
    /// The next call therefore runs against local storage again.
    pub async fn clear(&self) -> Result<()> {
        let (adapter, area) = self.active();
        let keys: Vec<String> = area
            .keys()
            .into_iter()
            .filter(|k| k.starts_with(&self.config.key_prefix))
            .collect();
        log::debug!("clear: removing {} item(s) from {adapter}", keys.len());

        for key in &keys {
            area.remove_item(key)
                .inspect_err(|e| log::error!("cannot remove {key:?} from {adapter}: {e:#}"))?;
        }

        self.backends.local.remove_item(&self.config.adapter_key)?;
        Ok(())
    }

    /// Prefixed keys in the active area, prefix included.
    ///
    /// The adapter preference is not an item and is left out when the
    /// active area is the local one.
    pub async fn keys(&self) -> Vec<String> {
        let (adapter, area) = self.active();
        area.keys()
            .into_iter()
            .filter(|k| k.starts_with(&self.config.key_prefix))
            .filter(|k| adapter != StorageAdapter::LocalStorage || *k != self.config.adapter_key)
            .collect()
    }

    /// Browsers have no per-item access control; this always fails.
    pub async fn get_accessibility(&self, key: &str) -> Result<Accessibility> {
        log::debug!("get_accessibility {key:?}: not supported on web");
        Err(SecureStorageError::NotImplemented)
    }

    pub async fn get_platform(&self) -> &str {
        &self.config.platform
    }
}
