//! The `document.cookie` interface and an in-memory emulation of it.
//!
//! `document.cookie` is an odd API: reading returns every visible cookie as
//! `name=value` pairs joined by `"; "`, writing assigns a *single*
//! `Set-Cookie`-style string that upserts (or deletes) one cookie.
//! [`CookieDocument`] captures exactly that, so the cookie-backed storage
//! area can run against the browser or against [`InMemoryCookieDocument`].

use anyhow::{bail, Result};
use std::sync::{Arc, RwLock};

/// A `document.cookie`-like accessor.
pub trait CookieDocument: Send + Sync {
    /// Returns the visible cookies as `name=value` pairs joined by `"; "`.
    fn cookie(&self) -> String;

    /// Assigns one cookie string, e.g. `"a=1; Path=/; SameSite=Strict"`.
    fn set_cookie(&self, cookie: &str) -> Result<()>;
}

/// A cookie as remembered by [`InMemoryCookieDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub same_site: Option<String>,
    pub secure: bool,
    /// Raw `Expires` attribute. Stored, not acted upon.
    pub expires: Option<String>,
    pub max_age: Option<i64>,
}

impl CookieRecord {
    /// A session cookie carries neither `Expires` nor `Max-Age`.
    pub fn is_session(&self) -> bool {
        self.expires.is_none() && self.max_age.is_none()
    }
}

/// In-memory `document.cookie` for a single origin and path.
///
/// Writes replace a cookie with the same name; `Max-Age` of zero or less
/// deletes it. Cookies keep their creation order, as browsers list them.
/// Clones share the same jar.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCookieDocument {
    jar: Arc<RwLock<Vec<CookieRecord>>>,
}

impl InMemoryCookieDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored cookies, attributes included.
    pub fn records(&self) -> Vec<CookieRecord> {
        self.jar.read().unwrap().clone()
    }

    /// Drops every cookie, as a browser does with session cookies on exit.
    pub fn end_session(&self) {
        self.jar.write().unwrap().retain(|c| !c.is_session());
    }
}

fn parse_set_cookie(s: &str) -> Result<CookieRecord> {
    let mut parts = s.split(';');
    let pair = parts.next().unwrap_or_default();
    let Some((name, value)) = pair.split_once('=') else {
        bail!("cookie string {s:?} has no name=value pair");
    };

    let mut cookie = CookieRecord {
        name: name.trim().to_string(),
        value: value.trim().to_string(),
        path: None,
        same_site: None,
        secure: false,
        expires: None,
        max_age: None,
    };

    for part in parts {
        let part = part.trim();
        if let Some((k, v)) = part.split_once('=') {
            match k.trim().to_ascii_lowercase().as_str() {
                "path" => cookie.path = Some(v.trim().to_string()),
                "samesite" => cookie.same_site = Some(v.trim().to_string()),
                "expires" => cookie.expires = Some(v.trim().to_string()),
                "max-age" => cookie.max_age = v.trim().parse().ok(),
                _ => {}
            }
        } else if part.eq_ignore_ascii_case("secure") {
            cookie.secure = true;
        }
    }

    Ok(cookie)
}

impl CookieDocument for InMemoryCookieDocument {
    fn cookie(&self) -> String {
        self.jar
            .read()
            .unwrap()
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set_cookie(&self, cookie: &str) -> Result<()> {
        let cookie = parse_set_cookie(cookie)?;
        let mut jar = self.jar.write().unwrap();

        if matches!(cookie.max_age, Some(age) if age <= 0) {
            jar.retain(|c| c.name != cookie.name);
            return Ok(());
        }

        // Replace existing cookie with same name
        if let Some(existing) = jar.iter_mut().find(|c| c.name == cookie.name) {
            *existing = cookie;
        } else {
            jar.push(cookie);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_back_as_joined_pairs() {
        let doc = InMemoryCookieDocument::new();
        assert_eq!(doc.cookie(), "");

        doc.set_cookie("a=1; Path=/").unwrap();
        doc.set_cookie("b=2").unwrap();
        assert_eq!(doc.cookie(), "a=1; b=2");
    }

    #[test]
    fn same_name_replaces_in_place() {
        let doc = InMemoryCookieDocument::new();
        doc.set_cookie("a=1").unwrap();
        doc.set_cookie("b=2").unwrap();
        doc.set_cookie("a=3").unwrap();
        assert_eq!(doc.cookie(), "a=3; b=2");
    }

    #[test]
    fn non_positive_max_age_deletes() {
        let doc = InMemoryCookieDocument::new();
        doc.set_cookie("a=1").unwrap();
        doc.set_cookie("a=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT").unwrap();
        assert_eq!(doc.cookie(), "");

        // deleting something that never existed is fine
        doc.set_cookie("zzz=; max-age=-1").unwrap();
        assert!(doc.records().is_empty());
    }

    #[test]
    fn attributes_are_recorded() {
        let doc = InMemoryCookieDocument::new();
        doc.set_cookie("a=1; Path=/app; SameSite=Lax; Secure").unwrap();

        let rec = &doc.records()[0];
        assert_eq!(rec.path.as_deref(), Some("/app"));
        assert_eq!(rec.same_site.as_deref(), Some("Lax"));
        assert!(rec.secure);
        assert!(rec.is_session());
    }

    #[test]
    fn end_session_keeps_persistent_cookies() {
        let doc = InMemoryCookieDocument::new();
        doc.set_cookie("session=1").unwrap();
        doc.set_cookie("persistent=1; Max-Age=3600").unwrap();

        doc.end_session();
        assert_eq!(doc.cookie(), "persistent=1");
    }

    #[test]
    fn malformed_cookie_string_is_rejected() {
        let doc = InMemoryCookieDocument::new();
        assert!(doc.set_cookie("no-equals-sign").is_err());
    }
}
