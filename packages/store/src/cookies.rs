//! # Cookie persistence: where the token survives between page loads
//!
//! The token lives in memory inside a session, but its durable copy is a
//! cookie. [`CookieStore`] abstracts over where that cookie jar lives so the
//! same session logic runs in the browser and while rendering a request on the
//! server:
//!
//! | Backend | Used for |
//! |---------|----------|
//! | [`crate::MemoryCookies`] | Server-rendered requests (seeded from the `Cookie` header), native builds and tests |
//! | [`crate::BrowserCookies`] | The browser's `document.cookie` (WASM + `web` feature) |
//!
//! [`token_cookie`] builds the cookie written on every token change.
//! [`encode_cookie`] and [`find_cookie`] are the `document.cookie` wire format:
//! values are percent-encoded, so tokens containing `;` or spaces survive.

use cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use crate::config::CookieConfig;

/// Synchronous access to a cookie jar.
///
/// Methods take `&self`; implementations handle their own interior
/// mutability so a store can be shared by clones of one session.
pub trait CookieStore {
    /// Value of the cookie called `name`, if set.
    fn get(&self, name: &str) -> Option<String>;
    /// Add or replace a cookie.
    fn set(&self, cookie: Cookie<'static>);
    /// Remove the cookie called `name` that was set at `path`.
    fn remove(&self, name: &str, path: &str);
}

/// Build the cookie that persists `token`: path `/`, `SameSite=Strict`,
/// not `Secure`, expiring `max_age_days` from now.
pub fn token_cookie(config: &CookieConfig, token: impl Into<String>) -> Cookie<'static> {
    let expires = OffsetDateTime::now_utc() + Duration::days(i64::from(config.max_age_days));
    Cookie::build((config.name.clone(), token.into()))
        .path("/")
        .secure(false)
        .same_site(SameSite::Strict)
        .expires(expires)
        .build()
}

/// `Set-Cookie`-style string for `cookie`, name and value percent-encoded.
pub fn encode_cookie(cookie: &Cookie<'_>) -> String {
    cookie.encoded().to_string()
}

/// Decoded value of the cookie called `name` in a `Cookie` header or
/// `document.cookie` string. Unparseable pairs are skipped.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}
