//! A [`StorageArea`] stored in session cookies.
//!
//! Each item is one cookie. Names and values are percent-encoded with the
//! `encodeURIComponent` character set so arbitrary keys survive cookie
//! syntax.
//!
//! ## Constraints
//! - Cookies are written **without** `Expires`/`Max-Age`: they are session
//!   cookies and disappear when the browser session ends.
//! - Every item travels with each HTTP request to the origin (unless the
//!   path excludes it) and is readable by any script on the page. Keep the
//!   data small.
//! - A serialized `name=value` pair larger than
//!   [`CookieConfig::max_cookie_bytes`] (4096 by default, the per-cookie
//!   size browsers guarantee) is refused with [`CookieError::TooLarge`]
//!   instead of being dropped silently by the browser.
//! - Browsers also cap the number of cookies per domain (typically 50 to
//!   180). That limit is not enforced here; excess cookies are evicted by
//!   the browser.
//! - `keys()` and `clear()` see every cookie visible to the document, not
//!   only the ones written through this area.

use super::document::CookieDocument;
use crate::config::{CookieConfig, SameSite};
use crate::storage::StorageArea;
use anyhow::Result;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` escapes.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const EPOCH: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("cookie {name:?} is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge { name: String, size: usize, limit: usize },
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

fn decode(s: &str) -> String {
    percent_decode_str(s)
        .decode_utf8()
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

pub struct SessionCookieArea<D: CookieDocument> {
    document: D,
    config: CookieConfig,
}

impl<D: CookieDocument> SessionCookieArea<D> {
    pub fn new(document: D) -> Self {
        Self::with_config(document, CookieConfig::default())
    }

    /// Browsers drop `SameSite=None` cookies that lack `Secure`, so such a
    /// config is upgraded to `Secure`.
    pub fn with_config(document: D, mut config: CookieConfig) -> Self {
        if config.same_site == SameSite::None && !config.secure {
            log::warn!("SameSite=None cookies must be Secure; enabling Secure");
            config.secure = true;
        }
        Self { document, config }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// `(raw name, decoded name, decoded value)` in document order.
    fn pairs(&self) -> Vec<(String, String, String)> {
        self.document
            .cookie()
            .split(';')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .filter_map(|p| p.split_once('='))
            .map(|(n, v)| (n.trim().to_string(), decode(n.trim()), decode(v.trim())))
            .collect()
    }

    fn expire(&self, raw_name: &str) -> Result<()> {
        self.document.set_cookie(&format!(
            "{raw_name}=; Path={}; Max-Age=0; Expires={EPOCH}",
            self.config.path
        ))
    }

    fn attributes(&self) -> String {
        let mut attrs = format!(
            "; Path={}; SameSite={}",
            self.config.path,
            self.config.same_site.as_str()
        );
        if self.config.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }
}

impl<D: CookieDocument> StorageArea for SessionCookieArea<D> {
    fn get_item(&self, key: &str) -> Option<String> {
        self.pairs()
            .into_iter()
            .find(|(_, n, _)| n == key)
            .map(|(_, _, v)| v)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let pair = format!("{}={}", encode(key), encode(value));
        if pair.len() > self.config.max_cookie_bytes {
            return Err(CookieError::TooLarge {
                name: key.to_string(),
                size: pair.len(),
                limit: self.config.max_cookie_bytes,
            }
            .into());
        }
        self.document.set_cookie(&format!("{pair}{}", self.attributes()))
    }

    /// Expires the canonical cookie for `key` plus any cookie whose name
    /// decodes to `key` but is spelled differently (e.g. `a:b` vs `a%3Ab`).
    fn remove_item(&self, key: &str) -> Result<()> {
        let mut raw_names = vec![encode(key)];
        for (raw, name, _) in self.pairs() {
            if name == key && !raw_names.contains(&raw) {
                raw_names.push(raw);
            }
        }
        for raw in &raw_names {
            self.expire(raw)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut raw_names: Vec<String> = Vec::new();
        for (raw, _, _) in self.pairs() {
            if !raw_names.contains(&raw) {
                raw_names.push(raw);
            }
        }
        for raw in &raw_names {
            self.expire(raw)?;
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for (_, name, _) in self.pairs() {
            // the same name can show up once per matching path
            if !keys.contains(&name) {
                keys.push(name);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::InMemoryCookieDocument;

    #[test]
    fn writes_session_cookies_with_configured_attributes() {
        let cfg = CookieConfig {
            path: "/app".into(),
            same_site: SameSite::Lax,
            secure: true,
            ..CookieConfig::default()
        };
        let area = SessionCookieArea::with_config(InMemoryCookieDocument::new(), cfg);
        area.set_item("cap_sec_token", "YWJj").unwrap();

        let records = area.document().records();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.name, "cap_sec_token");
        assert_eq!(rec.value, "YWJj");
        assert_eq!(rec.path.as_deref(), Some("/app"));
        assert_eq!(rec.same_site.as_deref(), Some("Lax"));
        assert!(rec.secure);
        assert!(rec.is_session());
    }

    #[test]
    fn awkward_names_and_values_survive_encoding() {
        let area = SessionCookieArea::new(InMemoryCookieDocument::new());
        area.set_item("a; b=c", "x=y; z").unwrap();

        // nothing leaks into the cookie syntax
        assert_eq!(area.document().cookie(), "a%3B%20b%3Dc=x%3Dy%3B%20z");
        assert_eq!(area.get_item("a; b=c").as_deref(), Some("x=y; z"));
        assert_eq!(area.keys(), vec!["a; b=c".to_string()]);
    }

    #[test]
    fn base64_alphabet_is_escaped_reversibly() {
        let area = SessionCookieArea::new(InMemoryCookieDocument::new());
        area.set_item("k", "a+b/c==").unwrap();
        assert_eq!(area.get_item("k").as_deref(), Some("a+b/c=="));
    }

    #[test]
    fn oversized_cookie_is_refused() {
        let cfg = CookieConfig { max_cookie_bytes: 16, ..CookieConfig::default() };
        let area = SessionCookieArea::with_config(InMemoryCookieDocument::new(), cfg);

        area.set_item("k", "short").unwrap();
        let err = area.set_item("k", "a value that is far too long").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CookieError>(),
            Some(CookieError::TooLarge { limit: 16, .. })
        ));
        // previous value is untouched
        assert_eq!(area.get_item("k").as_deref(), Some("short"));
    }

    #[test]
    fn sees_foreign_cookies() {
        let doc = InMemoryCookieDocument::new();
        doc.set_cookie("_ga=GA1.2.3").unwrap();
        let area = SessionCookieArea::new(doc);
        area.set_item("mine", "1").unwrap();

        assert_eq!(area.keys(), vec!["_ga".to_string(), "mine".to_string()]);
        assert_eq!(area.get_item("_ga").as_deref(), Some("GA1.2.3"));
    }

    #[test]
    fn items_vanish_when_the_session_ends() {
        let area = SessionCookieArea::new(InMemoryCookieDocument::new());
        area.set_item("k", "v").unwrap();

        area.document().end_session();
        assert!(area.get_item("k").is_none());
    }

    #[test]
    fn undecodable_names_come_back_raw() {
        let doc = InMemoryCookieDocument::new();
        doc.set_cookie("bad%FFname=1").unwrap();
        let area = SessionCookieArea::new(doc);
        assert_eq!(area.keys(), vec!["bad%FFname".to_string()]);
    }

    #[test]
    fn non_canonical_names_are_removed_and_cleared() {
        let doc = InMemoryCookieDocument::new();
        doc.set_cookie("cap_sec_x:y=YWJj").unwrap();
        doc.set_cookie("cap_sec_a:b=MQ==").unwrap();
        let area = SessionCookieArea::new(doc);
        assert_eq!(area.get_item("cap_sec_x:y").as_deref(), Some("YWJj"));

        area.remove_item("cap_sec_x:y").unwrap();
        assert!(area.get_item("cap_sec_x:y").is_none());
        assert_eq!(area.keys(), vec!["cap_sec_a:b".to_string()]);

        area.clear().unwrap();
        assert!(area.keys().is_empty());
        assert!(area.document().records().is_empty());
    }

    #[test]
    fn same_site_none_is_forced_secure() {
        let cfg = CookieConfig {
            same_site: SameSite::None,
            secure: false,
            ..CookieConfig::default()
        };
        let area = SessionCookieArea::with_config(InMemoryCookieDocument::new(), cfg);
        area.set_item("k", "v").unwrap();

        let rec = &area.document().records()[0];
        assert_eq!(rec.same_site.as_deref(), Some("None"));
        assert!(rec.secure);
    }
}
