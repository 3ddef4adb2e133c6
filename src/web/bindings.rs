//! JavaScript surface of the plugin.
//!
//! Methods take and return the same plain objects as the TypeScript
//! plugin interface and reject with the error message string.

use crate::config::PluginConfig;
use crate::plugin::SecureStoragePlugin;
use crate::storage::{
    AdapterResult, KeyOptions, SetDataOptions, StorageAdapterOptions, StorageBackends, ValueResult,
};
use js_sys::Promise;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

fn reject(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn reply<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(reject)
}

fn options<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| reject(format!("invalid options: {e}")))
}

fn promise<F>(fut: F) -> Promise
where
    F: Future<Output = Result<JsValue, JsValue>> + 'static,
{
    future_to_promise(fut)
}

#[wasm_bindgen]
pub struct SecureStoragePluginWeb {
    inner: SecureStoragePlugin,
}

#[wasm_bindgen]
impl SecureStoragePluginWeb {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SecureStoragePluginWeb {
        let config = PluginConfig::default();
        let backends = StorageBackends::browser(config.cookie.clone());
        SecureStoragePluginWeb {
            inner: SecureStoragePlugin::new(config, backends),
        }
    }

    /// `({ web: { adapter } }) => { value: true }`
    #[wasm_bindgen(js_name = "setStorageAdapter")]
    pub fn set_storage_adapter(&self, opts: JsValue) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            let opts: StorageAdapterOptions = options(opts)?;
            plugin.set_storage_adapter(opts.web.adapter).await.map_err(reject)?;
            reply(&ValueResult { value: true })
        })
    }

    /// `() => { adapter }`
    #[wasm_bindgen(js_name = "getStorageAdapter")]
    pub fn get_storage_adapter(&self) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            let adapter = plugin.get_storage_adapter().await;
            reply(&AdapterResult { adapter })
        })
    }

    /// `({ key }) => { value }`, rejects when the key is absent.
    pub fn get(&self, opts: JsValue) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            let opts: KeyOptions = options(opts)?;
            let value = plugin.get(&opts.key).await.map_err(reject)?;
            reply(&ValueResult { value })
        })
    }

    /// `({ key, value }) => { value: true }`
    pub fn set(&self, opts: JsValue) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            let opts: SetDataOptions = options(opts)?;
            plugin.set(&opts.key, &opts.value).await.map_err(reject)?;
            reply(&ValueResult { value: true })
        })
    }

    /// `({ key }) => { value: true }`
    pub fn remove(&self, opts: JsValue) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            let opts: KeyOptions = options(opts)?;
            plugin.remove(&opts.key).await.map_err(reject)?;
            reply(&ValueResult { value: true })
        })
    }

    /// `() => { value: true }`
    pub fn clear(&self) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            plugin.clear().await.map_err(reject)?;
            reply(&ValueResult { value: true })
        })
    }

    /// `() => { value: string[] }`
    pub fn keys(&self) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            let value = plugin.keys().await;
            reply(&ValueResult { value })
        })
    }

    /// Always rejects.
    #[wasm_bindgen(js_name = "getAccessibility")]
    pub fn get_accessibility(&self, opts: JsValue) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            let opts: KeyOptions = options(opts)?;
            let value = plugin.get_accessibility(&opts.key).await.map_err(reject)?;
            reply(&ValueResult { value })
        })
    }

    /// `() => { value: "web" }`
    #[wasm_bindgen(js_name = "getPlatform")]
    pub fn get_platform(&self) -> Promise {
        let plugin = self.inner.clone();
        promise(async move {
            let value = plugin.get_platform().await.to_string();
            reply(&ValueResult { value })
        })
    }
}

impl Default for SecureStoragePluginWeb {
    fn default() -> Self {
        Self::new()
    }
}
