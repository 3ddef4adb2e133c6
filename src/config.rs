//! Plugin configuration.
//!
//! `PluginConfig` holds the key layout the plugin writes into browser
//! storage and the attributes used for the cookie-backed adapter.
//!
//! The defaults match the layout other platforms of the plugin expect
//! (`cap_sec_` prefix, `cap_sec_adapter` preference key), so changing them
//! makes existing data invisible.
//!
//! # Examples
//!
//! ```rust
//! use secure_storage_web::config::{PluginConfig, SameSite};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = PluginConfig::builder()
//!     .cookie_secure(true)
//!     .cookie_same_site(SameSite::Lax)
//!     .build()?;
//! assert_eq!(cfg.key_prefix, "cap_sec_");
//! # Ok(()) }
//! ```

use std::fmt;

pub const DEFAULT_KEY_PREFIX: &str = "cap_sec_";
pub const DEFAULT_ADAPTER_KEY: &str = "cap_sec_adapter";
pub const DEFAULT_PLATFORM: &str = "web";
/// Per-cookie size most browsers guarantee (name + value).
pub const DEFAULT_MAX_COOKIE_BYTES: usize = 4096;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes for cookies written by the `sessionCookie` adapter.
///
/// No expiry attribute is configurable: entries are always session cookies.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub path: String,
    pub same_site: SameSite,
    pub secure: bool,
    /// Largest serialized `name=value` pair accepted.
    pub max_cookie_bytes: usize,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            same_site: SameSite::Strict,
            secure: false,
            max_cookie_bytes: DEFAULT_MAX_COOKIE_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Prefix applied to every managed key.
    pub key_prefix: String,
    /// Key of the adapter preference in the local area.
    pub adapter_key: String,
    /// Value reported by `get_platform`.
    pub platform: String,
    pub cookie: CookieConfig,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            adapter_key: DEFAULT_ADAPTER_KEY.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            cookie: CookieConfig::default(),
        }
    }
}

impl PluginConfig {
    pub fn builder() -> PluginConfigBuilder {
        PluginConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PluginConfigBuilder {
    inner: PluginConfig,
}

impl PluginConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut PluginConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn key_prefix<S: Into<String>>(self, p: S) -> Self { self.map(|c| c.key_prefix = p.into()) }
    pub fn adapter_key<S: Into<String>>(self, k: S) -> Self { self.map(|c| c.adapter_key = k.into()) }
    pub fn platform<S: Into<String>>(self, p: S) -> Self { self.map(|c| c.platform = p.into()) }
    pub fn cookie_path<S: Into<String>>(self, p: S) -> Self { self.map(|c| c.cookie.path = p.into()) }
    pub fn cookie_same_site(self, s: SameSite) -> Self { self.map(|c| c.cookie.same_site = s) }
    pub fn cookie_secure(self, on: bool) -> Self { self.map(|c| c.cookie.secure = on) }
    pub fn max_cookie_bytes(self, n: usize) -> Self { self.map(|c| c.cookie.max_cookie_bytes = n) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut PluginConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<PluginConfig, PluginConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginConfigError {
    EmptyKeyPrefix,
    EmptyAdapterKey,
    RelativeCookiePath(String),
    ZeroCookieSize,
    InsecureSameSiteNone,
}

impl fmt::Display for PluginConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginConfigError::EmptyKeyPrefix =>
                write!(f, "key_prefix must not be empty"),
            PluginConfigError::EmptyAdapterKey =>
                write!(f, "adapter_key must not be empty"),
            PluginConfigError::RelativeCookiePath(p) =>
                write!(f, "cookie path {p:?} must start with '/'"),
            PluginConfigError::ZeroCookieSize =>
                write!(f, "max_cookie_bytes must be at least 1"),
            PluginConfigError::InsecureSameSiteNone =>
                write!(f, "SameSite=None cookies must be Secure"),
        }
    }
}
impl std::error::Error for PluginConfigError {}

fn validate(c: &PluginConfig) -> Result<(), PluginConfigError> {
    if c.key_prefix.is_empty() {
        return Err(PluginConfigError::EmptyKeyPrefix);
    }
    if c.adapter_key.is_empty() {
        return Err(PluginConfigError::EmptyAdapterKey);
    }
    if !c.cookie.path.starts_with('/') {
        return Err(PluginConfigError::RelativeCookiePath(c.cookie.path.clone()));
    }
    if c.cookie.max_cookie_bytes == 0 {
        return Err(PluginConfigError::ZeroCookieSize);
    }
    if c.cookie.same_site == SameSite::None && !c.cookie.secure {
        return Err(PluginConfigError::InsecureSameSiteNone);
    }
    Ok(())
}
