//! Cookie-backed storage: [`SessionCookieArea`] over a [`CookieDocument`].

mod document;
mod session_cookie;

pub use document::{CookieDocument, CookieRecord, InMemoryCookieDocument};
pub use session_cookie::{CookieError, SessionCookieArea};
