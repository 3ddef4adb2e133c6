//! Web backend for a cross-platform secure storage plugin.
//!
//! Stores string key/value pairs in one of three browser mechanisms:
//!
//! - `localStorage` (default, persistent)
//! - `sessionStorage` (tab-scoped)
//! - session cookies on `document.cookie`
//!
//! The active mechanism is chosen per call from a preference stored in
//! `localStorage` under `cap_sec_adapter`. Every item key is prefixed with
//! `cap_sec_`; values are base64 encoded.
//!
//! **This is not secure storage.** Base64 is an encoding, not encryption;
//! the backend exists so applications get the same API on the web as on
//! native platforms.
//!
//! ```rust
//! use secure_storage_web::{SecureStoragePlugin, StorageAdapter};
//!
//! # tokio_test_block_on(async {
//! let plugin = SecureStoragePlugin::in_memory();
//! plugin.set("token", "abc").await.unwrap();
//! assert_eq!(plugin.get("token").await.unwrap(), "abc");
//!
//! plugin.set_storage_adapter(StorageAdapter::SessionStorage).await.unwrap();
//! assert!(plugin.get("token").await.is_err());
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod config;
pub mod cookies;
pub mod errors;
pub mod plugin;
pub mod storage;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web;

pub use config::PluginConfig;
pub use errors::SecureStorageError;
pub use plugin::SecureStoragePlugin;
pub use storage::{StorageAdapter, StorageArea, StorageBackends};
