//! Browser bindings (wasm32, `wasm` feature).
//!
//! - [`WebStorageArea`] — `localStorage` / `sessionStorage` through `web-sys`.
//! - [`BrowserCookieDocument`] — `document.cookie` for the session cookie adapter.
//! - [`SecureStoragePluginWeb`] — the plugin class exported to JavaScript.

mod bindings;
mod storage;

pub use bindings::{init, SecureStoragePluginWeb};
pub use storage::{BrowserCookieDocument, WebStorageArea, WebStorageKind};
