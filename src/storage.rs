//! Storage areas for the secure storage plugin.
//!
//! The plugin never talks to browser globals directly. It is handed a set of
//! [`StorageArea`] implementations, one per [`StorageAdapter`], bundled in
//! [`StorageBackends`], and picks one per call from the adapter preference
//! stored in the local area.
//!
//! # Available types
//!
//! - [`StorageArea`] — Trait for any storage backend (DOM `Storage` contract).
//! - [`StorageAdapter`] — Identifies the backend: `localStorage`,
//!   `sessionStorage` or `sessionCookie`.
//! - [`StorageBackends`] — Handles to the three areas plus adapter selection.
//! - [`InMemoryLocalStorage`], [`InMemorySessionStorage`] — in-memory areas
//!   for tests and non-browser hosts.
//!
//! The cookie-backed area lives in [`crate::cookies`], the browser-backed
//! areas in `crate::web` (wasm32 with the `wasm` feature).

/// Storage area module, defining the key/value storage interface.
pub mod area;
/// Base64 value encoding.
pub mod codec;
/// Adapter selection over the three storage areas.
pub mod selector;
/// Storage types
pub mod types;

/// Local storage module, providing persistent storage areas.
pub mod local {
    /// In-memory local storage implementation.
    pub mod in_memory;
}

/// Session storage module, providing tab-scoped storage areas.
pub mod session {
    /// In-memory session storage implementation.
    pub mod in_memory;
}

pub use area::StorageArea;
pub use local::in_memory::InMemoryLocalStorage;
pub use selector::StorageBackends;
pub use session::in_memory::InMemorySessionStorage;
pub use types::{
    Accessibility, AdapterResult, KeyOptions, SetDataOptions, StorageAdapter,
    StorageAdapterOptions, UnknownAdapter, ValueResult, WebAdapterOptions,
};
