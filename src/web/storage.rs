//! Browser-backed storage areas.
//!
//! The browser objects are looked up on every call rather than held, the
//! same way page scripts reach the `localStorage` global. That keeps these
//! types free of `JsValue` (and thus `Send + Sync`).

use crate::config::CookieConfig;
use crate::cookies::{CookieDocument, SessionCookieArea};
use crate::storage::{StorageArea, StorageBackends};
use anyhow::{anyhow, Result};
use std::fmt;
use std::sync::Arc;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebStorageKind {
    Local,
    Session,
}

impl fmt::Display for WebStorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebStorageKind::Local => f.write_str("localStorage"),
            WebStorageKind::Session => f.write_str("sessionStorage"),
        }
    }
}

/// `window.localStorage` or `window.sessionStorage`.
#[derive(Debug, Clone, Copy)]
pub struct WebStorageArea {
    kind: WebStorageKind,
}

impl WebStorageArea {
    pub fn local() -> Self {
        Self { kind: WebStorageKind::Local }
    }

    pub fn session() -> Self {
        Self { kind: WebStorageKind::Session }
    }

    fn storage(&self) -> Result<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window object"))?;
        let storage = match self.kind {
            WebStorageKind::Local => window.local_storage(),
            WebStorageKind::Session => window.session_storage(),
        };
        storage
            .map_err(|e| anyhow!("{} is not accessible: {e:?}", self.kind))?
            .ok_or_else(|| anyhow!("{} is not available", self.kind))
    }
}

impl StorageArea for WebStorageArea {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage().ok()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // QuotaExceededError ends up here
        self.storage()?
            .set_item(key, value)
            .map_err(|e| anyhow!("{}.setItem failed: {e:?}", self.kind))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| anyhow!("{}.removeItem failed: {e:?}", self.kind))
    }

    fn clear(&self) -> Result<()> {
        self.storage()?
            .clear()
            .map_err(|e| anyhow!("{}.clear failed: {e:?}", self.kind))
    }

    fn len(&self) -> usize {
        self.storage()
            .ok()
            .and_then(|s| s.length().ok())
            .unwrap_or(0) as usize
    }

    fn keys(&self) -> Vec<String> {
        let Ok(storage) = self.storage() else {
            return vec![];
        };
        let len = storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .collect()
    }
}

/// The page's `document.cookie`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCookieDocument;

fn html_document() -> Result<web_sys::HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow!("no document object"))?
        .dyn_into::<web_sys::HtmlDocument>()
        .map_err(|_| anyhow!("document is not an HTML document"))
}

impl CookieDocument for BrowserCookieDocument {
    fn cookie(&self) -> String {
        html_document()
            .and_then(|d| d.cookie().map_err(|e| anyhow!("document.cookie read failed: {e:?}")))
            .unwrap_or_default()
    }

    fn set_cookie(&self, cookie: &str) -> Result<()> {
        html_document()?
            .set_cookie(cookie)
            .map_err(|e| anyhow!("document.cookie write failed: {e:?}"))
    }
}

impl StorageBackends {
    /// The page's real storage: `localStorage`, `sessionStorage` and
    /// session cookies on `document.cookie`.
    pub fn browser(cookie_config: CookieConfig) -> Self {
        Self::new(
            Arc::new(WebStorageArea::local()),
            Arc::new(WebStorageArea::session()),
            Arc::new(SessionCookieArea::with_config(BrowserCookieDocument, cookie_config)),
        )
    }
}
