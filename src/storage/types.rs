use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Browser storage mechanism backing the plugin.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StorageAdapter {
    /// `window.localStorage`, survives browser restarts.
    #[default]
    #[serde(rename = "localStorage")]
    LocalStorage,
    /// `window.sessionStorage`, scoped to the tab.
    #[serde(rename = "sessionStorage")]
    SessionStorage,
    /// Session cookies on `document.cookie`.
    #[serde(rename = "sessionCookie")]
    SessionCookie,
}

impl StorageAdapter {
    pub const ALL: [StorageAdapter; 3] = [
        StorageAdapter::LocalStorage,
        StorageAdapter::SessionStorage,
        StorageAdapter::SessionCookie,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageAdapter::LocalStorage => "localStorage",
            StorageAdapter::SessionStorage => "sessionStorage",
            StorageAdapter::SessionCookie => "sessionCookie",
        }
    }

    /// Maps a persisted preference to an adapter. Absent or unrecognized
    /// values fall back to [`StorageAdapter::LocalStorage`].
    pub fn from_preference(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for StorageAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage adapter: {0:?}")]
pub struct UnknownAdapter(pub String);

impl FromStr for StorageAdapter {
    type Err = UnknownAdapter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageAdapter::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAdapter(s.to_string()))
    }
}

/// Keychain accessibility classes understood by the native backends.
///
/// Browsers have no per-item access control, so the web backend only
/// carries this type for interface parity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    AfterFirstUnlock,
    AfterFirstUnlockThisDeviceOnly,
    WhenUnlocked,
    WhenUnlockedThisDeviceOnly,
    WhenPasscodeSetThisDeviceOnly,
}

/// Options accepted by `set`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetDataOptions {
    pub key: String,
    pub value: String,
    /// Ignored on web.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
}

/// Options accepted by `get`, `remove` and `getAccessibility`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyOptions {
    pub key: String,
}

/// Options accepted by `setStorageAdapter`: `{ web: { adapter } }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageAdapterOptions {
    pub web: WebAdapterOptions,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WebAdapterOptions {
    pub adapter: StorageAdapter,
}

/// `{ value: T }` result envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueResult<T> {
    pub value: T,
}

/// `{ adapter }` result envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdapterResult {
    pub adapter: StorageAdapter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_adapter_is_local_storage() {
        assert_eq!(StorageAdapter::default(), StorageAdapter::LocalStorage);
    }

    #[test]
    fn identifiers_parse_back() {
        for a in StorageAdapter::ALL {
            assert_eq!(a.as_str().parse::<StorageAdapter>().unwrap(), a);
            assert_eq!(a.to_string(), a.as_str());
        }
    }

    #[test]
    fn unknown_identifier_is_rejected_by_parse() {
        let err = "indexedDB".parse::<StorageAdapter>().unwrap_err();
        assert_eq!(err, UnknownAdapter("indexedDB".into()));
        // case matters
        assert!("SessionStorage".parse::<StorageAdapter>().is_err());
    }

    #[test]
    fn preference_fails_open() {
        assert_eq!(StorageAdapter::from_preference(None), StorageAdapter::LocalStorage);
        assert_eq!(StorageAdapter::from_preference(Some("")), StorageAdapter::LocalStorage);
        assert_eq!(StorageAdapter::from_preference(Some("garbage")), StorageAdapter::LocalStorage);
        assert_eq!(
            StorageAdapter::from_preference(Some("sessionStorage")),
            StorageAdapter::SessionStorage
        );
        assert_eq!(
            StorageAdapter::from_preference(Some("sessionCookie")),
            StorageAdapter::SessionCookie
        );
    }

    #[test]
    fn wire_shapes() {
        let opts: StorageAdapterOptions =
            serde_json::from_str(r#"{"web":{"adapter":"sessionCookie"}}"#).unwrap();
        assert_eq!(opts.web.adapter, StorageAdapter::SessionCookie);

        let set: SetDataOptions =
            serde_json::from_str(r#"{"key":"k","value":"v","accessibility":"whenUnlocked"}"#).unwrap();
        assert_eq!(set.accessibility, Some(Accessibility::WhenUnlocked));

        let set: SetDataOptions = serde_json::from_str(r#"{"key":"k","value":"v"}"#).unwrap();
        assert!(set.accessibility.is_none());

        let json = serde_json::to_string(&AdapterResult { adapter: StorageAdapter::LocalStorage }).unwrap();
        assert_eq!(json, r#"{"adapter":"localStorage"}"#);

        let json = serde_json::to_string(&ValueResult { value: true }).unwrap();
        assert_eq!(json, r#"{"value":true}"#);
    }
}
